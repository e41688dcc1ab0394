use anyhow::Result;
use blockdoc_config::Config;
use blockdoc_engine::{
    Block as DocBlock, BlockContent, BlockEditor, BlockType, Direction as MoveDirection, ListType,
    create_block, io,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// Longest content preview shown per block
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Files,
    Blocks,
}

struct App {
    documents_path: PathBuf,
    files: Vec<RelativePathBuf>,
    file_list_state: ListState,
    block_list_state: ListState,
    editor: Option<BlockEditor>,
    saved_version: u64,
    focus: Focus,
    status: String,
}

impl App {
    fn new(documents_path: PathBuf) -> Result<Self> {
        let files = io::scan_documents(&documents_path)?
            .iter()
            .filter_map(|path| path.strip_prefix(&documents_path).ok())
            .filter_map(|path| RelativePathBuf::from_path(path).ok())
            .collect();

        let mut app = Self {
            documents_path,
            files,
            file_list_state: ListState::default(),
            block_list_state: ListState::default(),
            editor: None,
            saved_version: 0,
            focus: Focus::Files,
            status: String::new(),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selected_document();
        }

        Ok(app)
    }

    fn selected_file(&self) -> Option<&RelativePathBuf> {
        self.file_list_state
            .selected()
            .and_then(|index| self.files.get(index))
    }

    fn is_dirty(&self) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|editor| editor.version() != self.saved_version)
    }

    /// Switching documents is refused while the open one has unsaved edits.
    fn keep_unsaved_document(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        let name = self
            .selected_file()
            .map(|path| path.to_string())
            .unwrap_or_default();
        self.status = format!("Unsaved edits in {name}: press s to save before switching");
        true
    }

    fn next_file(&mut self) {
        if self.files.is_empty() || self.keep_unsaved_document() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected_document();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() || self.keep_unsaved_document() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.load_selected_document();
    }

    fn load_selected_document(&mut self) {
        let Some(path) = self.selected_file().cloned() else {
            return;
        };
        match io::load_editor(&path, &self.documents_path) {
            Ok(editor) => {
                self.saved_version = editor.version();
                self.block_list_state.select(Some(0));
                self.status = format!("{path}: {} blocks", editor.len());
                self.editor = Some(editor);
            }
            Err(e) => {
                self.status = format!("Error reading file: {e}");
                self.editor = None;
                self.block_list_state.select(None);
            }
        }
    }

    fn save(&mut self) {
        let Some(path) = self.selected_file().cloned() else {
            return;
        };
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        let result = io::save_editor(editor, &path, &self.documents_path);
        let version = editor.version();
        match result {
            Ok(()) => {
                self.saved_version = version;
                self.status = format!("Saved {path}");
            }
            Err(e) => self.status = format!("Error saving {path}: {e}"),
        }
    }

    fn selected_block(&self) -> Option<&DocBlock> {
        let editor = self.editor.as_ref()?;
        editor.blocks().get(self.block_list_state.selected()?)
    }

    fn select_block(&mut self, step: isize) {
        let Some(len) = self.editor.as_ref().map(BlockEditor::len) else {
            return;
        };
        if len == 0 {
            self.block_list_state.select(None);
            return;
        }
        let current = self.block_list_state.selected().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len as isize) as usize;
        self.block_list_state.select(Some(next));
    }

    fn move_selected_block(&mut self, direction: MoveDirection) {
        let Some(id) = self.selected_block().map(|block| block.id.clone()) else {
            return;
        };
        if let Some(editor) = self.editor.as_mut() {
            editor.move_block(&id, direction);
            self.block_list_state.select(editor.position(&id));
        }
    }

    fn delete_selected_block(&mut self) {
        let Some(id) = self.selected_block().map(|block| block.id.clone()) else {
            return;
        };
        if let Some(editor) = self.editor.as_mut() {
            let remaining = editor.delete_block(&id).len();
            let selected = self
                .block_list_state
                .selected()
                .map(|i| i.min(remaining.saturating_sub(1)));
            self.block_list_state
                .select(selected.filter(|_| remaining > 0));
        }
    }

    fn add_block(&mut self, block_type: BlockType) {
        if let Some(editor) = self.editor.as_mut() {
            let len = editor.add_block(create_block(block_type)).len();
            self.block_list_state.select(Some(len - 1));
            self.status = format!("Added {} block", block_type.label());
        }
    }

    fn block_lines(&self) -> Vec<String> {
        self.editor
            .as_ref()
            .map(|editor| editor.blocks().iter().map(summarize).collect())
            .unwrap_or_default()
    }
}

/// One-line description of a block for the block list.
fn summarize(block: &DocBlock) -> String {
    let detail = match &block.content {
        BlockContent::Text(text) => format!("{} {}", text.text_type.tag(), text.content),
        BlockContent::Image(image) => format!("{} ({})", image.url, image.alignment.keyword()),
        BlockContent::Video(video) => video.url.clone(),
        BlockContent::Table(table) => format!(
            "{} cols × {} rows: {}",
            table.headers.len(),
            table.rows.len(),
            table.headers.join(" | ")
        ),
        BlockContent::Divider(divider) => divider.style.name().to_string(),
        BlockContent::Quote(quote) => match &quote.author {
            Some(author) => format!("\"{}\" — {author}", quote.content),
            None => format!("\"{}\"", quote.content),
        },
        BlockContent::List(list) => {
            let marker = match list.list_type {
                ListType::Bullet => "•",
                ListType::Numbered => "1.",
                ListType::Checklist => "☐",
            };
            format!("{marker} {}", list.items.join(", "))
        }
        BlockContent::Code(code) => format!(
            "[{}] {}",
            code.language.as_deref().unwrap_or("plain"),
            code.content.lines().next().unwrap_or_default()
        ),
    };
    let preview: String = detail.chars().take(PREVIEW_CHARS).collect();
    format!("{:>2}. {:<8} {preview}", block.order, block.block_type().label())
}

fn block_type_for_key(c: char) -> Option<BlockType> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    BlockType::ALL.get(index).copied()
}

fn main() -> Result<()> {
    // Warn by default; RUST_LOG overrides
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    // Determine documents path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let documents_path;
    let from_config;

    if args.len() == 2 {
        documents_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                documents_path = config.documents_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No documents path provided and no config file found");
                eprintln!("Usage: {} <documents-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <documents-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [documents-folder-path]", args[0]);
        process::exit(1);
    };

    if let Err(e) = io::validate_documents_dir(&documents_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Documents path '{}'{} is invalid: {e}",
            documents_path.display(),
            source
        );
        process::exit(1);
    }

    let mut app = App::new(documents_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (app.focus, key.code) {
            (_, KeyCode::Char('q')) => return Ok(()),
            (_, KeyCode::Char('s')) => app.save(),
            (Focus::Files, KeyCode::Down | KeyCode::Char('j')) => app.next_file(),
            (Focus::Files, KeyCode::Up | KeyCode::Char('k')) => app.previous_file(),
            (Focus::Files, KeyCode::Enter | KeyCode::Tab) if app.editor.is_some() => {
                app.focus = Focus::Blocks;
            }
            (Focus::Blocks, KeyCode::Esc | KeyCode::Tab) => app.focus = Focus::Files,
            (Focus::Blocks, KeyCode::Down | KeyCode::Char('j')) => app.select_block(1),
            (Focus::Blocks, KeyCode::Up | KeyCode::Char('k')) => app.select_block(-1),
            (Focus::Blocks, KeyCode::Char('J')) => app.move_selected_block(MoveDirection::Down),
            (Focus::Blocks, KeyCode::Char('K')) => app.move_selected_block(MoveDirection::Up),
            (Focus::Blocks, KeyCode::Char('d')) => app.delete_selected_block(),
            (Focus::Blocks, KeyCode::Char(c)) => {
                if let Some(block_type) = block_type_for_key(c) {
                    app.add_block(block_type);
                }
            }
            _ => {}
        }
    }
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| ListItem::new(Line::from(Span::raw(format!("📄 {path}")))))
        .collect();

    let files_list = List::new(file_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::Files))
                .title("Documents"),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Block panel
    let dirty = if app.is_dirty() { " [modified]" } else { "" };
    let block_items: Vec<ListItem> = if app.editor.is_none() {
        vec![ListItem::new("Select a document to edit its blocks")]
    } else {
        app.block_lines().into_iter().map(ListItem::new).collect()
    };

    let blocks_list = List::new(block_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::Blocks))
                .title(format!("Blocks{dirty}")),
        )
        .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));

    f.render_stateful_widget(blocks_list, chunks[1], &mut app.block_list_state);

    // Help and status at bottom
    let help = match app.focus {
        Focus::Files => "q: Quit | ↑/k ↓/j: Select | Enter/Tab: Edit blocks | s: Save",
        Focus::Blocks => {
            "Esc: Back | ↑/k ↓/j: Select | K/J: Move | d: Delete | 1-8: Add text/image/video/table/divider/quote/list/code | s: Save"
        }
    };
    let footer = Paragraph::new(vec![Line::from(help), Line::from(app.status.as_str())])
        .block(Block::default());

    f.render_widget(footer, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdoc_engine::{QuoteBlock, TableBlock};
    use std::fs;
    use tempfile::TempDir;

    fn documents_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("lamp.html"),
            "<h1>Lamp</h1><p>Warm light</p><hr>",
        )
        .unwrap();
        fs::create_dir(dir.path().join("desks")).unwrap();
        fs::write(dir.path().join("desks/oak.html"), "<p>Oak</p>").unwrap();
        dir
    }

    #[test]
    fn keys_one_to_eight_pick_block_types() {
        assert_eq!(block_type_for_key('1'), Some(BlockType::Text));
        assert_eq!(block_type_for_key('8'), Some(BlockType::Code));
        assert_eq!(block_type_for_key('0'), None);
        assert_eq!(block_type_for_key('9'), None);
        assert_eq!(block_type_for_key('x'), None);
    }

    #[test]
    fn summary_shows_order_type_and_preview() {
        let mut block = DocBlock::new(QuoteBlock {
            content: "Bright".into(),
            author: Some("Ana".into()),
        });
        block.order = 3;
        assert_eq!(summarize(&block), " 3. Quote    \"Bright\" — Ana");

        let table = DocBlock::new(TableBlock::default());
        assert!(summarize(&table).contains("2 cols × 1 rows"));
    }

    #[test]
    fn app_lists_documents_relative_to_root() {
        let dir = documents_dir();
        let app = App::new(dir.path().to_path_buf()).unwrap();

        let files: Vec<_> = app.files.iter().map(|p| p.as_str().to_string()).collect();
        assert_eq!(files, vec!["desks/oak.html", "lamp.html"]);
        assert_eq!(app.editor.as_ref().map(BlockEditor::len), Some(1));
    }

    #[test]
    fn edits_mark_dirty_until_saved() {
        let dir = documents_dir();
        let mut app = App::new(dir.path().to_path_buf()).unwrap();
        app.next_file();
        assert_eq!(app.editor.as_ref().map(BlockEditor::len), Some(3));

        app.block_list_state.select(Some(2));
        app.move_selected_block(MoveDirection::Up);
        assert_eq!(app.block_list_state.selected(), Some(1));
        assert!(app.is_dirty());

        app.save();
        assert!(!app.is_dirty());
        let saved = fs::read_to_string(dir.path().join("lamp.html")).unwrap();
        assert!(saved.starts_with("<h1>Lamp</h1>\n<hr"));
    }

    #[test]
    fn unsaved_edits_block_switching_documents() {
        let dir = documents_dir();
        let mut app = App::new(dir.path().to_path_buf()).unwrap();
        app.add_block(BlockType::Divider);
        assert!(app.is_dirty());

        app.next_file();
        assert_eq!(app.file_list_state.selected(), Some(0));
        assert_eq!(app.editor.as_ref().map(BlockEditor::len), Some(2));
        assert!(app.status.contains("Unsaved edits in desks/oak.html"));

        app.previous_file();
        assert_eq!(app.file_list_state.selected(), Some(0));

        app.save();
        app.next_file();
        assert_eq!(app.file_list_state.selected(), Some(1));
        assert_eq!(app.editor.as_ref().map(BlockEditor::len), Some(3));
    }

    #[test]
    fn delete_keeps_selection_in_range() {
        let dir = documents_dir();
        let mut app = App::new(dir.path().to_path_buf()).unwrap();
        app.next_file();
        app.block_list_state.select(Some(2));

        app.delete_selected_block();

        assert_eq!(app.block_list_state.selected(), Some(1));
        app.add_block(BlockType::Code);
        assert_eq!(app.block_list_state.selected(), Some(2));
    }
}
