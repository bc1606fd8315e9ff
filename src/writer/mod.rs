pub mod batch_indexer;
