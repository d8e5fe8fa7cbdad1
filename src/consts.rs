// Limits and well-known values shared across the crate

// JVMS 4.3.2: an array type descriptor is valid only with 255 or fewer dimensions
pub const DEFAULT_MAX_ARRAY_DIMENSIONS: usize = 255;

// Type arguments nested inside type arguments; bounds parser recursion
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

// Class file magic number
pub const CLASS_FILE_MAGIC: u32 = 0xCAFE_BABE;

// Environment switches read by Config::from_env
pub const ENV_LENIENT: &str = "JCLASS_LENIENT";
pub const ENV_DEBUG: &str = "JCLASS_DEBUG";

// Characters that can never appear inside a signature identifier
pub const IDENTIFIER_EXCLUDED: &[char] = &['.', ';', '[', '/', '<', '>', ':'];
