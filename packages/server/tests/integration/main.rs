mod common;
mod persistence;
