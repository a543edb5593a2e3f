//! Trigger keyword detection, directive synthesis and tagged-response parsing for AI chat clients.
//!
//! The engine turns a plain chat exchange into a structured one in two independent stages. On the way out, the
//! user message is scanned for registered trigger keywords and a directive is synthesized instructing the model
//! to wrap parts of its reply in XML-like tags. On the way back, the complete response is parsed to pull those
//! tagged segments out, leaving clean text for display. The parser tolerates code blocks carrying tag-like
//! samples, hallucinated tags outside the known vocabulary, and responses truncated mid-tag.
//!
//! Everything apart from the registry overlay store is a pure function over in-memory strings, with no I/O and
//! no failure channel: whatever the model returns, there is always something to render.
//!
//! ```rust
//! use trigger_engine::{TriggerRegistry, detect, parse, synthesize};
//!
//! let registry = TriggerRegistry::new();
//!
//! let detections = detect("reason about rust lifetimes", &registry.enabled());
//! let directive = synthesize(&detections, None);
//! assert!(directive.starts_with("reason means"));
//!
//! let reply = "<reason>Lifetimes tie borrows to scopes.</reason>They ensure safety.";
//! let result = parse(reply, &registry.vocabulary());
//! assert_eq!(result.segments[0].tag, "reason");
//! assert_eq!(result.clean_content, "They ensure safety.");
//! ```

#![forbid(unsafe_code)]

pub mod detector;
pub mod errors;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod registry;
pub mod storage;
pub mod tracker;
pub mod utils;
pub mod visibility;

mod builtins;

pub use detector::detect;
pub use parser::parse;
pub use prompt::synthesize;
pub use registry::TriggerRegistry;
pub use storage::TriggerStore;
