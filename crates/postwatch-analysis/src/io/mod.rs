//! Post table I/O. CSV with a header row, UTF-8.

pub mod reader;
pub mod writer;

pub use reader::{read_cleaned_posts, read_raw_posts, read_table};
pub use writer::{
    render_cleaned_posts, render_labeled_posts, write_all_atomic, write_atomic, write_cleaned_posts,
    write_labeled_posts, write_raw_posts,
};
