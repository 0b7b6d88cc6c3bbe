fn main() {
    #[cfg(target_arch = "wasm32")]
    backoffice_frontend::run();
}
