/// Newest entry of a feed, reduced to the fields the prompts need.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub link: String,
}
