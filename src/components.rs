use super::models;
use ammonia::{clean, clean_text};
use rand::seq::SliceRandom;

/// Cosmetic card colors, chosen uniformly at random per note per render.
/// Deliberately not persisted; a reload reshuffles them.
const NOTE_PALETTE: [&str; 5] =
    ["#FFEB3B", "#FFCDD2", "#BBDEFB", "#C8E6C9", "#E1BEE7"];

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }
    input, textarea, select { display: block; margin: 0.5rem 0; width: 100%; }
    .flash { background: #FFF9C4; padding: 0.5rem; border-radius: 4px; }
    .note { padding: 1rem; margin: 0.5rem 0; border-radius: 4px; }
    .note .meta { font-size: 0.8rem; color: #444; }
    .toolbar { display: flex; gap: 1rem; align-items: center; }
    .toolbar form { display: flex; gap: 0.5rem; }
    .toolbar input, .toolbar select { display: inline; width: auto; }
"#;

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

pub struct Page<'a> {
    pub title: &'a str,
    pub flash: Option<String>,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        let flash_html = match &self.flash {
            Some(message) => {
                format!(r#"<p class="flash">{}</p>"#, clean(message))
            }
            None => "".to_string(),
        };
        format!(
            r#"
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title}</title>
                    <style>{STYLE}</style>
                </head>
                <body>
                    {flash_html}
                    {body_html}
                </body>
            </html>
            "#,
            title = clean(self.title),
            body_html = self.children.render()
        )
    }
}

#[derive(Default)]
pub struct RegisterForm {}
impl Component for RegisterForm {
    fn render(&self) -> String {
        r#"
        <h1>Create an account</h1>
        <form method="POST" action="/register">
            <label for="username">Username</label>
            <input type="text" name="username" id="username" />
            <label for="email">Email</label>
            <input type="email" name="email" id="email" />
            <label for="password">Password</label>
            <input type="password" name="password" id="password" />
            <button>Register</button>
        </form>
        <p>Already registered? <a href="/login">Log in</a></p>
        "#
        .to_string()
    }
}

#[derive(Default)]
pub struct LoginForm {}
impl Component for LoginForm {
    fn render(&self) -> String {
        r#"
        <h1>Log in</h1>
        <form method="POST" action="/login">
            <label for="email">Email</label>
            <input type="email" name="email" id="email" />
            <label for="password">Password</label>
            <input type="password" name="password" id="password" />
            <button>Log in</button>
        </form>
        <p>New here? <a href="/register">Create an account</a></p>
        "#
        .to_string()
    }
}

/// Shared between `/add` (no note yet) and `/edit/:id` (pre-filled).
pub struct NoteForm<'a> {
    pub note: Option<&'a models::Note>,
}

impl Component for NoteForm<'_> {
    fn render(&self) -> String {
        let (action, heading, title, content, tags) = match self.note {
            Some(note) => (
                format!("/edit/{}", note.id),
                "Edit note",
                clean_text(&note.title),
                clean(&note.content),
                clean_text(&note.tags),
            ),
            None => (
                "/add".to_string(),
                "Add a note",
                "".to_string(),
                "".to_string(),
                "".to_string(),
            ),
        };
        format!(
            r#"
            <h1>{heading}</h1>
            <form method="POST" action="{action}">
                <label for="title">Title</label>
                <input type="text" name="title" id="title" value="{title}" />
                <label for="content">Content</label>
                <textarea name="content" id="content" rows="6">{content}</textarea>
                <label for="tags">Tags</label>
                <input type="text" name="tags" id="tags" value="{tags}" />
                <button>Save</button>
            </form>
            <p><a href="/">Back to your notes</a></p>
            "#
        )
    }
}

pub struct NoteCard<'a> {
    pub note: &'a models::Note,
}

impl Component for NoteCard<'_> {
    fn render(&self) -> String {
        let color = NOTE_PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("#FFEB3B");
        let tags_html = if self.note.tags.is_empty() {
            "".to_string()
        } else {
            format!("<p class=\"meta\">tags: {}</p>", clean(&self.note.tags))
        };
        format!(
            r#"
            <div class="note" style="background: {color}">
                <h2>{title}</h2>
                <p>{content}</p>
                {tags_html}
                <p class="meta">created {created} / updated {updated}</p>
                <a href="/edit/{id}">edit</a>
                <form method="POST" action="/delete/{id}">
                    <button>delete</button>
                </form>
            </div>
            "#,
            title = clean(&self.note.title),
            content = clean(&self.note.content),
            created = self.note.created_at.format("%Y-%m-%d %H:%M"),
            updated = self.note.updated_at.format("%Y-%m-%d %H:%M"),
            id = self.note.id,
        )
    }
}

pub struct NoteList<'a> {
    pub notes: &'a [models::Note],
    pub search: &'a str,
    pub sort: &'a str,
}

impl Component for NoteList<'_> {
    fn render(&self) -> String {
        let cards = if self.notes.is_empty() {
            "<p>No notes yet.</p>".to_string()
        } else {
            self.notes
                .iter()
                .map(|note| NoteCard { note }.render())
                .collect::<Vec<String>>()
                .join("")
        };
        let (date_selected, title_selected) = if self.sort == "title" {
            ("", "selected")
        } else {
            ("selected", "")
        };
        format!(
            r#"
            <h1>Your notes</h1>
            <div class="toolbar">
                <a href="/add">Add a note</a>
                <form method="GET" action="/">
                    <input type="text" name="q" value="{search}" placeholder="filter" />
                    <select name="sort">
                        <option value="date" {date_selected}>newest first</option>
                        <option value="title" {title_selected}>by title</option>
                    </select>
                    <button>Apply</button>
                </form>
                <a href="/logout">Log out</a>
            </div>
            {cards}
            "#,
            search = clean_text(self.search),
        )
    }
}
