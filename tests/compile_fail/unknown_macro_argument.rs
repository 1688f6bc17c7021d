//! Test unknown named_formats argument error.

use named_format::named_formats;

pub struct Routes;

#[named_formats(fast)]
impl Routes {
    #[template("/{a}")]
    pub fn item(a: u32) -> String;
}

fn main() {
    let _ = Routes;
}
