use named_format::named_formats;

pub trait Render {
    fn render(&self) -> String;
}

#[named_formats(optimize, buffer_size = 512)]
impl dyn Render {
    #[template("<{tag}>{body}</{close}>")]
    pub fn element(tag: &str, body: &str, close: &str) -> String;
}

struct Bold(&'static str);

impl Render for Bold {
    fn render(&self) -> String {
        <dyn Render>::element("b", self.0, "b")
    }
}

fn main() {
    assert_eq!(Bold("hi").render(), "<b>hi</b>");
}
