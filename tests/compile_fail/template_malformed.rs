//! Test unbalanced brackets error; the sibling stub is still generated.

use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template("{a")]
    pub fn broken(a: u32) -> String;

    #[template("/ok/{a}")]
    pub fn ok(a: u32) -> String;
}

fn main() {
    assert_eq!(Routes::ok(1), "/ok/1");
}
