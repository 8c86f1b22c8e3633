//! Output formatting for answers and retrieved context

pub mod console;
pub mod formatter;
