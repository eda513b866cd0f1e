//! Generates the foreign-language bindings for `signinkit-core`.
//!
//! ```sh
//! cargo run -p uniffi-bindgen -- generate \
//!     --library target/aarch64-linux-android/release/libsigninkit_core.so \
//!     --language kotlin --out-dir plugin/src/main/kotlin
//! ```

fn main() {
    uniffi::uniffi_bindgen_main();
}
