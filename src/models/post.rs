use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct FrontMatter {
    pub layout: String,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub front_matter: FrontMatter,
    pub image_path: String,
    pub body: String,
}

impl Post {
    /// Renders the post the way the site generator expects it: front matter,
    /// the article image, then the body.
    pub fn render(&self) -> String {
        let title = self.front_matter.title.replace('"', "\\\"");
        format!(
            "---\nlayout: {}\ntitle: \"{}\"\ndate: {}\n---\n\n![記事画像]({})\n\n{}\n",
            self.front_matter.layout,
            title,
            self.front_matter.date.format("%Y-%m-%d"),
            self.image_path,
            self.body
        )
    }
}
