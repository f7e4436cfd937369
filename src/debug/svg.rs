use std::{fmt, io, path};

use crate::{BoundingBox2D, debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SvgOutputLevel {
    None,
    ResultOnly,
    MajorSteps,
    AllSteps,
}

pub(crate) struct SvgOutput<'a, Style> {
    pub context: &'a SvgContext,
    pub style: Style,
    content: String,
}

impl<'a, Style> SvgOutput<'a, Style> {
    pub fn new(context: &'a SvgContext, style: Style) -> Self {
        Self {
            context,
            style,
            content: String::new(),
        }
    }

    pub fn append_element<State, E: SvgElement<Style, State>>(&mut self, element: &E, state: &State) -> fmt::Result {
        element.write_svg(self, state)
    }

    pub fn save<P: AsRef<path::Path>>(self, file_name: P) -> io::Result<()> {
        use std::io::Write;

        let path = self.context.output_path.join(file_name);
        let f = std::fs::File::create(path)?;
        let mut w = io::BufWriter::new(&f);

        writeln!(w, "<svg viewBox=\"{}, {}, {}, {}\" xmlns=\"http://www.w3.org/2000/svg\">", self.context.view_x_min, self.context.view_y_min, self.context.view_w(), self.context.view_h())?;
        writeln!(w, "{}", self.content)?;
        writeln!(w, "</svg>")?;
        Ok(())
    }
}

impl<'a, Style> fmt::Write for SvgOutput<'a, Style> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.content.write_str(s)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SvgElementStyle {
    Hide,
    Standard,
    Highlight,
}

/// Which split edges a decomposition snapshot emphasizes
pub(crate) struct SvgDecompositionStyle {
    highlight: Option<usize>,
    hide_excluded: bool,
    pub add_labels: bool,
}

impl Default for SvgDecompositionStyle {
    fn default() -> Self {
        Self {
            highlight: None,
            hide_excluded: false,
            add_labels: true,
        }
    }
}

impl SvgDecompositionStyle {
    pub fn highlight_split(id: usize) -> Self {
        Self {
            highlight: Some(id),
            ..Self::default()
        }
    }

    pub fn active_only() -> Self {
        Self {
            hide_excluded: true,
            ..Self::default()
        }
    }

    pub fn split_style(&self, id: usize, excluded: bool) -> SvgElementStyle {
        if self.highlight == Some(id) {
            SvgElementStyle::Highlight
        } else if self.hide_excluded && excluded {
            SvgElementStyle::Hide
        } else {
            SvgElementStyle::Standard
        }
    }
}

pub(crate) struct SvgContext {
    pub output_path: path::PathBuf,
    pub output_level: SvgOutputLevel,
    pub view_x_min: f32,
    pub view_x_max: f32,
    pub view_y_min: f32,
    pub view_y_max: f32,
    pub show_labels: bool,
}

impl SvgContext {
    /// Reads the output configuration from the environment; `None` when no output is requested
    pub fn from_env(bbox: BoundingBox2D) -> Option<Self> {
        let output_path = debug::env::svg::output_path()?;
        let output_level = debug::env::svg::output_level();
        let show_labels = debug::env::svg::show_labels();

        if output_level == SvgOutputLevel::None || bbox.is_empty() {
            return None;
        }

        let margin = bbox.width().max(bbox.height()) * 0.1;
        let view = bbox.extent(margin);

        Some(Self {
            output_path,
            output_level,
            view_x_min: view.min.x as f32,
            view_x_max: view.max.x as f32,
            view_y_min: view.min.y as f32,
            view_y_max: view.max.y as f32,
            show_labels,
        })
    }

    pub fn view_w(&self) -> f32 { self.view_x_max - self.view_x_min }
    pub fn view_h(&self) -> f32 { self.view_y_max - self.view_y_min }

    pub fn view_min_size(&self) -> f32 { self.view_w().min(self.view_h()) }

    pub fn percent(&self, p: f32) -> f32 { self.view_min_size() * p / 100.0 }
}

pub(crate) trait SvgElement<Style, State=()> {
    fn write_svg<'a>(&self, svg_output: &mut SvgOutput<'a, Style>, state: &State) -> fmt::Result;
}

// svg_fmt is missing a function for Circle
pub(crate) fn circle(x: f32, y: f32, r: f32) -> svg_fmt::Circle {
    svg_fmt::Circle {
        x,
        y,
        radius: r,
        style: svg_fmt::Style::default(),
    }
}
