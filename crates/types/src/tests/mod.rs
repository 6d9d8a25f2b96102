// Test module for the type system
//
// Exact rational arithmetic, type names and operator typing.
