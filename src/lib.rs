pub mod core;
pub mod analysis;
pub mod dataset;
pub mod writer;
pub mod search;

pub use crate::core::config::Config;
pub use crate::core::database::GameDatabase;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{FieldValue, GameRecord, RecordId};
pub use crate::analysis::token::{MoveList, MoveToken};
pub use crate::search::results::{Outcome, OutcomeBreakdown, SearchHits};

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          CHESSDEX STRUCT ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CORE LAYER ──────────────────────────────────┐
│  struct GameDatabase                                                         │
│  ┌────────────────────────────────────────────────────────────────────────┐  │
│  │ config: Config                  // max_moves, cache_depth, batching    │  │
│  │ store: Arc<DatasetStore>        // records, then move lists            │  │
│  │ indexer: BatchIndexer           // batched move parsing, busy flag     │  │
│  │ engine: SearchEngine            // prefix search + cache lock          │  │
│  └────────────────────────────────────────────────────────────────────────┘  │
└──────────────────────────────────────────────────────────────────────────────┘
                 │                         │                         │
                 ▼                         ▼                         ▼
┌──────── DATASET ────────┐ ┌──────── WRITER ─────────┐ ┌──────── SEARCH ─────────┐
│ DatasetStore            │ │ BatchIndexer            │ │ SearchEngine            │
│  phase: RwLock<Phase>   │ │  normalizer             │ │  cache: Mutex<          │
│   Empty                 │ │  batch_size             │ │     PrefixCache>        │
│   Loaded(records)       │◄┤  yield_delay            │ │  stats: SearchStats     │
│   Indexed(records,      │ │  busy: AtomicBool       │ │  listener               │
│           move lists)   │ │  progress: AtomicUsize  │ │                         │
│ Row (projection)        │ └─────────────────────────┘ │ PrefixCache (arena)     │
└─────────────────────────┘              │              │  nodes: Vec<CacheNode>  │
                                         ▼              │   games: RoaringBitmap  │
                            ┌──────── ANALYSIS ───────┐ │   children: token → id  │
                            │ MoveNormalizer          │ │ SearchHits / Outcomes   │
                            │ MoveToken (key w/o +/#) │◄┤                         │
                            │ MoveList                │ └─────────────────────────┘
                            └─────────────────────────┘
*/
