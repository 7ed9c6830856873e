fn main() {
    // sqlx::migrate! embeds these at compile time
    println!("cargo:rerun-if-changed=migrations");
}
