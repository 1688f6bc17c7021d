use named_format::named_formats;

pub struct Routes;

#[named_formats]
impl Routes {
    #[template("/forum/{boardId}/{boardNameSlug}")]
    pub fn board(board_id: u32, slug: &str) -> String;
}

fn main() {
    assert_eq!(Routes::board(1, "news"), "/forum/1/news");
}
