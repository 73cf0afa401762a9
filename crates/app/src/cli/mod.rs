pub mod args;
pub mod op;
pub mod ops;

pub use ops::{
    Cat, Df, Health, Link, Ls, Mkdir, Mv, Rm, Rmdir, Serve, Stat, Touch, Truncate, Version, Write,
};

pub use clap::Parser;
