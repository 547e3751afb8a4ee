pub mod audio;
pub mod llm;
pub mod observability;
pub mod process;
pub mod storage;
pub mod synthesis;
