pub mod postgres;

pub trait Database: std::fmt::Debug + Sync + Send + Clone + 'static {
    /// Write the placeholder for the `index`th bound argument, counting from 1.
    fn write_placeholder(buf: &mut String, index: usize);
}
