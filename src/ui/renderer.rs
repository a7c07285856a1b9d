//! View renderer — dispatches a view mode to its component.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::core::{column::ViewMode, record::Record};
use crate::ui::switcher::{DefaultViewSwitcher, SwitcherComponent};
use crate::ui::views::{
    CardView, GalleryView, KanbanView, ListView, TableView, ViewComponent, ViewProps,
};

/// Caller-supplied replacements for the built-in components.  Any slot
/// left `None` uses the default.
pub struct ViewComponents<T> {
    pub table: Option<Box<dyn ViewComponent<T>>>,
    pub card: Option<Box<dyn ViewComponent<T>>>,
    pub list: Option<Box<dyn ViewComponent<T>>>,
    pub kanban: Option<Box<dyn ViewComponent<T>>>,
    pub gallery: Option<Box<dyn ViewComponent<T>>>,
    pub view_switcher: Option<Box<dyn SwitcherComponent>>,
}

impl<T> Default for ViewComponents<T> {
    fn default() -> Self {
        Self {
            table: None,
            card: None,
            list: None,
            kanban: None,
            gallery: None,
            view_switcher: None,
        }
    }
}

impl<T: Record> ViewComponents<T> {
    pub fn with_view(mut self, mode: ViewMode, component: impl ViewComponent<T> + 'static) -> Self {
        let slot = match mode {
            ViewMode::Table => &mut self.table,
            ViewMode::Card => &mut self.card,
            ViewMode::List => &mut self.list,
            ViewMode::Kanban => &mut self.kanban,
            ViewMode::Gallery => &mut self.gallery,
        };
        *slot = Some(Box::new(component));
        self
    }

    pub fn with_switcher(mut self, switcher: impl SwitcherComponent + 'static) -> Self {
        self.view_switcher = Some(Box::new(switcher));
        self
    }

    /// The component that draws `mode`.
    pub fn view(&self, mode: ViewMode) -> &dyn ViewComponent<T> {
        let custom = match mode {
            ViewMode::Table => &self.table,
            ViewMode::Card => &self.card,
            ViewMode::List => &self.list,
            ViewMode::Kanban => &self.kanban,
            ViewMode::Gallery => &self.gallery,
        };
        match custom {
            Some(c) => c.as_ref(),
            None => default_view(mode),
        }
    }

    pub fn switcher(&self) -> &dyn SwitcherComponent {
        match &self.view_switcher {
            Some(s) => s.as_ref(),
            None => &DefaultViewSwitcher,
        }
    }
}

/// Built-in component for `mode`.
pub fn default_view<'a, T: Record>(mode: ViewMode) -> &'a dyn ViewComponent<T> {
    match mode {
        ViewMode::Table => &TableView,
        ViewMode::Card => &CardView,
        ViewMode::List => &ListView,
        ViewMode::Kanban => &KanbanView,
        ViewMode::Gallery => &GalleryView,
    }
}

/// Renders the current page in the selected mode, optionally inside a
/// block.
pub struct ViewRenderer<'a, T> {
    pub mode: ViewMode,
    pub props: ViewProps<'a, T>,
    pub components: Option<&'a ViewComponents<T>>,
    pub block: Option<Block<'a>>,
}

impl<'a, T: Record> ViewRenderer<'a, T> {
    pub fn new(mode: ViewMode, props: ViewProps<'a, T>) -> Self {
        Self {
            mode,
            props,
            components: None,
            block: None,
        }
    }

    pub fn components(mut self, components: &'a ViewComponents<T>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn component(&self) -> &dyn ViewComponent<T> {
        match self.components {
            Some(c) => c.view(self.mode),
            None => default_view(self.mode),
        }
    }

    fn content_area(&self, area: Rect) -> Rect {
        match &self.block {
            Some(b) => b.inner(area),
            None => area,
        }
    }

    /// Index into the page rows of the row drawn at `(x, y)` when the
    /// renderer occupies `area`.
    pub fn row_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let inner = self.content_area(area);
        self.component().row_at(&self.props, inner, x, y)
    }
}

impl<T: Record> Widget for ViewRenderer<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.content_area(area);
        if let Some(block) = &self.block {
            block.clone().render(area, buf);
        }
        self.component().render(&self.props, inner, buf);
    }
}
