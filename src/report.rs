// Validation flow for one user id: fetch the user, fetch their posts,
// print a summary. Rendering is a pure function over the fetched data so
// the exact console text can be tested without a network.

use crate::api::ApiClient;
use crate::interrupt::Interrupt;
use crate::models::{Post, User, UserId};
use std::io::{self, Write};

/// How many post titles the summary lists.
pub const MAX_TITLES: usize = 3;

/// Fetch user and posts for `id` and write the report to `out`.
///
/// Posts are requested even when the user lookup failed; both requests
/// always go out, and the posts are simply dropped in that case. A Ctrl-C
/// during the user request abandons the lookup before the posts request.
pub fn validate<W: Write>(
    api: &ApiClient,
    id: &UserId,
    interrupt: &Interrupt,
    out: &mut W,
) -> io::Result<()> {
    let user = api.fetch_user(id, out)?;
    if interrupt.is_triggered() {
        return Ok(());
    }
    let posts = api.fetch_posts(id, out)?;
    if interrupt.is_triggered() {
        return Ok(());
    }
    for line in render(user.as_ref(), &posts) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Report lines for an (optional) user and their posts. An empty user
/// object is reported like a missing one.
pub fn render(user: Option<&User>, posts: &[Post]) -> Vec<String> {
    let Some(user) = user.filter(|u| !u.is_empty()) else {
        return vec!["\n❌ Integration cancelled: user does not exist.".to_string()];
    };

    let mut lines = vec![
        format!("\n👤 User:  {}", user.display_name()),
        format!("📧 Email: {}", user.display_email()),
        format!("🌍 City:  {}", user.display_city()),
    ];

    if posts.is_empty() {
        lines.push("\n⚠ This user has no posts.".to_string());
        return lines;
    }

    lines.push(format!("\n📌 This user has {} post(s). Examples:", posts.len()));
    lines.extend(
        posts
            .iter()
            .take(MAX_TITLES)
            .map(|post| format!("   - {}", post.display_title())),
    );
    lines.push("\n✔ Integration completed successfully!".to_string());
    lines
}
