//! Test placeholder count error.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template("/{a}/{b}")]
    pub fn short(a: u32) -> String;
}

fn main() {
    let _ = Routes;
}
