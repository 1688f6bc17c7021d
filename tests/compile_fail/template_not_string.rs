//! Test non-string template error.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template(42)]
    pub fn numeric(a: u32) -> String;
}

fn main() {
    let _ = Routes;
}
