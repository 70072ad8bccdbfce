mod common;
mod requirements;
