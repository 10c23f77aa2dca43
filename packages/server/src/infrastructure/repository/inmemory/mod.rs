//! InMemory 実装（プロセス終了と共に消える）

pub mod queue;

pub use queue::InMemoryQueueRepository;
