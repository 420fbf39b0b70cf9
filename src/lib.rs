pub mod synth;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod audio;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod console;
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod input;
pub mod runtime;
