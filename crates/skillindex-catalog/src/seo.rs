//! Static site discovery assets (sitemap.xml and robots.txt)

use skillindex_types::SkillRecord;

/// Public URL of the hosted directory
pub const DEFAULT_BASE_URL: &str = "https://skillindex.dev";

/// Render a sitemap with the home page and one detail page per record
pub fn render_sitemap(base_url: &str, skills: &[SkillRecord]) -> String {
    let base = base_url.trim_end_matches('/');

    let mut sitemap = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    push_url(&mut sitemap, &format!("{}/", base), "daily", "1.0");

    for skill in skills {
        let loc = format!("{}/skill/{}", base, skill.package_name);
        push_url(&mut sitemap, &loc, "weekly", "0.8");
    }

    sitemap.push_str("</urlset>\n");
    sitemap
}

/// Render a robots.txt allowing every crawler and pointing at the sitemap
pub fn render_robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

fn push_url(out: &mut String, loc: &str, changefreq: &str, priority: &str) {
    out.push_str("  <url>\n");
    out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    out.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    out.push_str(&format!("    <priority>{}</priority>\n", priority));
    out.push_str("  </url>\n");
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
