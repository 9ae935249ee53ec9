//! Visualization utilities for rigid_body_controls
//!
//! Renders the search tree and the solution path with gnuplot.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Path2D, PlanningError, PlanningResult, Point2D, Pose2D};
use crate::control_planning::RealVectorBounds;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const BOUNDS: &str = BLACK;
    pub const TREE: &str = GRAY;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::new(colors::PATH, "Path")
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

/// Primitive queued for drawing
#[derive(Debug, Clone)]
enum Layer {
    Lines { x: Vec<f64>, y: Vec<f64>, style: PathStyle },
    Points { x: Vec<f64>, y: Vec<f64>, style: PointStyle },
}

/// Main visualizer struct
///
/// Primitives are queued and drawn onto a single set of axes when the
/// figure is saved.
pub struct Visualizer {
    layers: Vec<Layer>,
    title: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            title: String::new(),
            x_range: None,
            y_range: None,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Draw the position bounds as a rectangle and fit the axes around it
    pub fn plot_bounds(&mut self, bounds: &RealVectorBounds) -> &mut Self {
        let (x0, y0, x1, y1) = (bounds.low[0], bounds.low[1], bounds.high[0], bounds.high[1]);
        self.layers.push(Layer::Lines {
            x: vec![x0, x1, x1, x0, x0],
            y: vec![y0, y0, y1, y1, y0],
            style: PathStyle::new(colors::BOUNDS, "Bounds").with_line_width(1.0),
        });
        let margin = 0.05 * (x1 - x0).max(y1 - y0);
        self.set_x_range(x0 - margin, x1 + margin);
        self.set_y_range(y0 - margin, y1 + margin)
    }

    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.layers.push(Layer::Lines {
            x: path.x_coords(),
            y: path.y_coords(),
            style: style.clone(),
        });
        self
    }

    /// Draw every parent-child edge of a search tree
    pub fn plot_tree(&mut self, tree: &[(Pose2D, Option<usize>)]) -> &mut Self {
        let style = PathStyle::new(colors::TREE, "").with_line_width(0.5);
        for (pose, parent) in tree {
            if let Some((from, _)) = parent.and_then(|i| tree.get(i)) {
                self.layers.push(Layer::Lines {
                    x: vec![from.x, pose.x],
                    y: vec![from.y, pose.y],
                    style: style.clone(),
                });
            }
        }
        self
    }

    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.layers.push(Layer::Points {
            x: vec![point.x],
            y: vec![point.y],
            style: style.clone(),
        });
        self
    }

    /// Point with a short heading stroke
    pub fn plot_pose(&mut self, pose: &Pose2D, style: &PointStyle) -> &mut Self {
        self.plot_point(pose.position(), style);
        let len = 0.05 * style.size;
        self.layers.push(Layer::Lines {
            x: vec![pose.x, pose.x + len * pose.yaw.cos()],
            y: vec![pose.y, pose.y + len * pose.yaw.sin()],
            style: PathStyle::new(&style.color, ""),
        });
        self
    }

    pub fn plot_start(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_pose(pose, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_pose(pose, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> PlanningResult<()> {
        let mut figure = self.render();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| PlanningError::VisualizationError(e.to_string()))
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for layer in &self.layers {
            match layer {
                Layer::Lines { x, y, style } => {
                    axes.lines(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        LineWidth(style.line_width),
                    ]);
                }
                Layer::Points { x, y, style } => {
                    axes.points(x, y, &[
                        Caption(&style.caption),
                        Color(&style.color),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label("X", &[]);
        axes.set_y_label("Y", &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        axes.set_aspect_ratio(AutoOption::Fix(1.0));
        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
