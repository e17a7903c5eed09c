// Class hierarchy oracle
//
// Hexagonal Architecture:
// - ports: ClassHierarchy trait consumed by the lifting engine
// - infrastructure: InMemoryClassHierarchy, declared up front by the caller

pub mod infrastructure;
pub mod ports;

pub use infrastructure::InMemoryClassHierarchy;
pub use ports::ClassHierarchy;
