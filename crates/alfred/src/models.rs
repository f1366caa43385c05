//! These models represent the objects passed through a chat completion
//!
//! There are two related formats we need to interact with:
//! - openai chat completion requests/responses, exchanged with the front end
//! - normalized content blocks, handed to the agent runtime
//!
//! Inbound messages are kept in the openai shape until the normalizer turns the
//! selected message into content blocks. Nothing here outlives a single request.
pub mod chat;
pub mod content;
