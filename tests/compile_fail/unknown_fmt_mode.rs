//! Test unknown fmt mode error.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template("/{id}")]
    pub fn hexed(#[fmt(hex)] id: u32) -> String;
}

fn main() {
    let _ = Routes;
}
