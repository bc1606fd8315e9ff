use std::time::Duration;
use chessdex::core::types::{fields, MoveRow};
use chessdex::{Config, ErrorKind, FieldValue, GameDatabase, GameRecord, MoveToken, Outcome};

fn games() -> Vec<GameRecord> {
    vec![
        GameRecord::new(1650, 1600, "Normal", 1.0, "C50"),
        GameRecord::new(1820, 1790, "Time forfeit", 0.0, "B20"),
        GameRecord::new(2010, 2050, "Normal", 0.5, "D06"),
        GameRecord::new(1400, 1450, "Normal", 0.0, "C20"),
    ]
}

fn move_rows() -> Vec<MoveRow> {
    ["1. e4 e5 2. Nf3 Nc6 3. Bc4", "1. e4 c5 2. Nf3 d6", "1. d4 d5 2. c4", "1. e4 e5 2. Qh5 Nc6"]
        .iter()
        .map(|m| MoveRow { moves: m.to_string() })
        .collect()
}

fn open(batch_size: usize) -> GameDatabase {
    let config = Config::default()
        .with_batch_size(batch_size)
        .with_yield_delay(Duration::from_millis(1));
    GameDatabase::open(config).unwrap()
}

#[tokio::test]
async fn full_session_lifecycle() {
    let db = open(2);
    assert_eq!(db.project(&[fields::SCORE]).unwrap_err().kind, ErrorKind::NotLoaded);

    db.load(games()).unwrap();
    let rows = db.project(&[fields::WHITE_ELO, fields::BLACK_ELO]).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].number(fields::BLACK_ELO), Some(2050.0));
    assert_eq!(db.search(&[]).unwrap_err().kind, ErrorKind::NotIndexed);

    db.index_moves(&move_rows()).await.unwrap();
    let stats = db.stats();
    assert!(stats.indexed);
    assert_eq!(stats.indexing_progress, 4);
    assert_eq!(stats.total_games, 4);

    let hits = db.search(&[MoveToken::new("e4"), MoveToken::new("e5")]).unwrap();
    let openings: Vec<&str> = hits.iter().map(|g| g.opening.as_str()).collect();
    assert_eq!(openings, vec!["C50", "C20"]);

    let outcomes = hits.outcomes();
    assert_eq!(outcomes.get(Outcome::WhiteWin).games, 1);
    assert_eq!(outcomes.get(Outcome::BlackWin).games, 1);
    assert_eq!(outcomes.get(Outcome::Draw).games, 0);
    assert!((outcomes.white.fraction - 0.5).abs() < 1e-9);

    let notation = db.search_notation("1. e4 e5 2. Nf3").unwrap();
    assert_eq!(notation.to_records(), vec![games()[0].clone()]);
}

#[tokio::test]
async fn search_during_indexing_is_not_indexed() {
    let db = open(1);
    db.load(games()).unwrap();
    let rows = move_rows();

    let (indexed, during, second_run) = tokio::join!(
        db.index_moves(&rows),
        async { db.search(&[]).map(|h| h.len()).map_err(|e| e.kind) },
        db.index_moves(&rows),
    );

    indexed.unwrap();
    assert_eq!(during, Err(ErrorKind::NotIndexed));
    assert_eq!(second_run.unwrap_err().kind, ErrorKind::Busy);
    assert_eq!(db.search(&[]).unwrap().len(), 4);
}

#[tokio::test]
async fn mismatched_rows_are_rejected_before_any_work() {
    let db = open(10);
    db.load(games()).unwrap();
    let mut rows = move_rows();
    rows.pop();

    let err = db.index_moves(&rows).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::LengthMismatch);
    assert_eq!(db.stats().indexing_progress, 0);
    assert_eq!(db.search(&[MoveToken::new("e4")]).unwrap_err().kind, ErrorKind::NotIndexed);
    assert!(db.project(&[fields::OPENING]).is_ok());
}

#[tokio::test]
async fn reload_after_indexing_is_refused() {
    let db = open(10);
    db.load(games()).unwrap();
    db.index_moves(&move_rows()).await.unwrap();
    assert_eq!(db.load(games()).unwrap_err().kind, ErrorKind::InvalidState);
}

#[test]
fn sample_projection_is_capped() {
    let db = open(10);
    db.load(games()).unwrap();
    assert_eq!(db.project_sample(2, &[fields::TERMINATION]).unwrap().len(), 2);
    assert_eq!(db.project_sample(50, &[fields::TERMINATION]).unwrap().len(), 4);
    assert!(db.project_sample(0, &[fields::TERMINATION]).unwrap().is_empty());
}

#[test]
fn records_deserialize_from_dataset_columns() {
    let json = r#"[
        {"WhiteElo": 1500, "BlackElo": 1480, "Termination": "Normal", "Score": 0.5,
         "Opening": "A40", "NumberMoves": 61, "Event": "Rated Bullet game", "Rated": true}
    ]"#;
    let records: Vec<GameRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records[0].number_moves, Some(61));
    assert_eq!(records[0].field("Event"), FieldValue::Text("Rated Bullet game".to_string()));
    assert_eq!(records[0].field("Rated"), FieldValue::Boolean(true));
    assert_eq!(records[0].field(fields::SCORE), FieldValue::Number(0.5));

    let rows: Vec<MoveRow> = serde_json::from_str(r#"[{"Moves": "d4 Nf6"}]"#).unwrap();
    assert_eq!(rows[0].moves, "d4 Nf6");
}

#[tokio::test]
async fn stats_serialize_to_json() {
    let db = open(10);
    db.load(games()).unwrap();
    db.index_moves(&move_rows()).await.unwrap();
    db.search(&[MoveToken::new("e4")]).unwrap();
    db.search(&[MoveToken::new("e4")]).unwrap();

    let stats = db.stats();
    assert_eq!(stats.searches, 2);
    assert_eq!(stats.cached_searches, 2);
    assert_eq!(stats.cache_stats.nodes, 1);
    assert_eq!(stats.cache_stats.stored_ids, 3);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["cache_stats"]["max_depth"], 4);
    assert_eq!(json["indexed"], true);
}

#[test]
fn invalid_config_is_rejected() {
    let err = GameDatabase::open(Config::default().with_max_moves(0)).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
}
