#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    space_bio_explorer::native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build starts through `space_bio_explorer::web::start`.
}
