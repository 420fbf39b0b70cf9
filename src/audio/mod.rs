mod cpal_backend;
pub use self::cpal_backend::CpalBackend;

pub trait AudioBackend {
    fn start(&mut self);
}
