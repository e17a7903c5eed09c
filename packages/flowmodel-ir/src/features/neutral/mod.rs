// Neutral Model Resolver
//
// - classification: a member with no observed flow is neutral
// - registry: a subject is either flowing or neutral, never both

mod resolver;

pub use resolver::NeutralModelResolver;
