use shadow_rs::ShadowBuilder;

fn main() {
    // embed_migrations! does not track the directory on its own
    println!("cargo:rerun-if-changed=migrations");

    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
