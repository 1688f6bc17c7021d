//! Test blank template error.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template("  ")]
    pub fn blank(a: u32) -> String;
}

fn main() {
    let _ = Routes;
}
