mod key_wrapping;
mod unsupported;
