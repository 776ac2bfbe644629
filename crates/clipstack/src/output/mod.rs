mod formatter;
mod plain;

pub(crate) use formatter::{Output, PlainText};
