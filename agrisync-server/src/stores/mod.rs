mod firebase;
#[cfg(any(test, feature = "mock"))]
mod memory;

pub use firebase::FirebaseStore;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryStore;
