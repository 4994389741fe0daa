#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod fake;
#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;
#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod local;
