//! HTML page builders shaped like the tracker's search pages.

/// Non-empty header labels of [`results_page`], in column order.
pub const HEADERS: [&str; 10] = [
    "Forum", "Topic", "DL", "Size", "S", "L", "R", "Th", "Rt", "Added",
];

/// Inner HTML of each data cell of one result row.
///
/// Every field is raw markup, so tests can break single cells.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub forum: String,
    pub topic: String,
    pub download: String,
    pub size: String,
    pub seeders: String,
    pub leechers: String,
    pub replies: String,
    /// `title` attribute of the replies cell.
    pub views_title: Option<String>,
    pub thanks: String,
    pub rating: String,
    pub added: String,
}

impl FixtureRow {
    /// A well-formed row for topic `id`.
    pub fn new(id: u32) -> Self {
        Self {
            forum: r#"<a class="gen" href="tracker.php?f=218">Video</a>"#.to_string(),
            topic: format!(
                r#"<a class="genmed topictitle" href="viewtopic.php?t={id}"><b>Result {id}</b></a>"#
            ),
            download: format!(r#"<a href="download.php?id={id}" rel="nofollow">DL</a>"#),
            size: "<u>1468006400</u> 1.37 GB".to_string(),
            seeders: "<b>25</b>".to_string(),
            leechers: "<b>3</b>".to_string(),
            replies: "12".to_string(),
            views_title: Some("1520".to_string()),
            thanks: "17".to_string(),
            rating: "4,5 votes (120)".to_string(),
            added: "<u>1215000000</u> 02-07-08".to_string(),
        }
    }

    fn to_html(&self, index: usize) -> String {
        let class = if index % 2 == 0 { "prow1" } else { "prow2" };
        let title = self
            .views_title
            .as_deref()
            .map(|t| format!(r#" title="{}""#, escape_attr(t)))
            .unwrap_or_default();

        format!(
            r#"<tr class="{class}">
<td class="pcatHead"><input type="checkbox" name="t[]"></td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td class="seedmed">{}</td>
<td class="leechmed">{}</td>
<td{title}>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
</tr>
"#,
            self.forum,
            self.topic,
            self.download,
            self.size,
            self.seeders,
            self.leechers,
            self.replies,
            self.thanks,
            self.rating,
            self.added,
        )
    }
}

/// A search results page with `rows`.
///
/// With `next_href` the pagination block ends in a next-page link pointing
/// there; without it the page looks like the last one.
pub fn results_page(rows: &[FixtureRow], next_href: Option<&str>) -> String {
    let headers: String = HEADERS
        .iter()
        .map(|h| format!("<th>{}</th>", h))
        .collect();
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.to_html(i))
        .collect();
    let links = match next_href {
        Some(href) => format!(
            r#"<a href="tracker.php?start=0">1</a>, <b>2</b>, <a href="{}">След.</a>"#,
            escape_attr(href)
        ),
        None => r#"<a href="tracker.php?start=0">Пред.</a>, <a href="tracker.php?start=0">1</a>, <b>2</b>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Tracker</title></head>
<body>
<form method="post" action="tracker.php">
<table class="forumline tablesorter" id="search_tbl">
<thead>
<tr>
<th class="{{sorter: false}}"></th>{headers}
</tr>
</thead>
<tbody>
{body}</tbody>
</table>
<table width="100%" cellspacing="2" border="0">
<tr>
<td class="nav">Page <b>1</b></td>
<td align="right"><span class="nav">{links}</span></td>
</tr>
</table>
</form>
</body>
</html>
"#
    )
}

/// A page without a results table (e.g. an error or captcha page).
pub fn page_without_table() -> String {
    r#"<!DOCTYPE html>
<html><body><div class="maintitle">Service unavailable</div></body></html>
"#
    .to_string()
}

/// The page the forum returns after a login attempt.
///
/// A logged-in page greets the user by name; the failed one does not.
pub fn login_page(logged_in_as: Option<&str>) -> String {
    let greeting = match logged_in_as {
        Some(user) => format!(r#"<a href="profile.php?mode=viewprofile">{}</a> [ Выход ]"#, user),
        None => "Вы ввели неверное/неактивное имя пользователя или неверный пароль".to_string(),
    };
    format!("<html><body><div class=\"mainmenu\">{}</div></body></html>", greeting)
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
