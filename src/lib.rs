//! jclass
//!
//! Reader and writer for two pieces of the Java class-file format.
//!
//! ## Architecture
//!
//! - **signature**: the generic signature grammar (JVMS §4.7.9.1). A
//!   backtracking parser turns `Signature` attribute text into an immutable
//!   tree that renders back to internal form or to Java source form, can be
//!   walked with a visitor, and can have a package qualifier filtered out.
//! - **cpinfo**: constant pool entries, the pool table and the class-file
//!   header that precedes it.
//! - **bin**: the `jclass` command-line tool.
//!
//! ```text
//! "<T:Ljava/lang/Object;>(TT;)V" → TextScanner → SignatureParser → MethodSignature
//!                                                                  ↓
//!                                   to_internal_form / to_external_form / walk / exclude_package_name
//! ```

pub mod config;
pub mod consts;
pub mod cpinfo;
pub mod error;
pub mod signature;

pub use config::Config;
pub use error::{Error, Result};
pub use signature::{parse_signature, Signature, SignatureForm};

/// Parse any signature and render it in Java source form
pub fn external_form(signature: &str, config: &Config) -> Result<String> {
    let parsed = signature::parse_signature_with(signature, config.clone())?;
    Ok(parsed.to_external_form())
}
