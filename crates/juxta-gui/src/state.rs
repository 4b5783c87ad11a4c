use std::path::PathBuf;

use juxta_core::config::{DisplayOptions, Method};
use juxta_core::crop::{CropColor, DisplayMapping, DisplayRect};
use juxta_core::view::{AspectWarning, GridView};

use crate::convert::upload;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub config_path: Option<PathBuf>,
    /// Options used for the next configuration that gets opened.
    pub default_options: DisplayOptions,
    /// Grid must be re-rendered on the next frame.
    pub dirty: bool,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

pub struct CellTexture {
    pub method: String,
    pub texture: egui::TextureHandle,
    pub missing: bool,
}

pub struct CloseViewTextures {
    pub id: String,
    pub number: usize,
    pub color: CropColor,
    pub thumbnails: Vec<Option<egui::TextureHandle>>,
}

pub struct RowTextures {
    pub index: usize,
    pub name: String,
    pub text: Option<String>,
    pub failed: bool,
    pub can_add_crop: bool,
    pub cells: Vec<CellTexture>,
    pub close_views: Vec<CloseViewTextures>,
}

/// A rendered grid page with its images uploaded to the GPU.
pub struct GridTextures {
    pub methods: Vec<Method>,
    pub rows: Vec<RowTextures>,
    pub aspect_warnings: Vec<AspectWarning>,
}

impl GridTextures {
    pub fn upload(ctx: &egui::Context, grid: GridView) -> Self {
        let rows = grid
            .rows
            .into_iter()
            .map(|row| {
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| CellTexture {
                        texture: upload(ctx, &format!("cell_{}_{}", row.index, cell.method), &cell.image),
                        method: cell.method.clone(),
                        missing: cell.missing,
                    })
                    .collect();
                let close_views = row
                    .close_views
                    .iter()
                    .map(|view| CloseViewTextures {
                        thumbnails: view
                            .thumbnails
                            .iter()
                            .enumerate()
                            .map(|(i, thumb)| {
                                thumb.as_ref().map(|img| {
                                    upload(ctx, &format!("close_{}_{}_{i}", row.index, view.id), img)
                                })
                            })
                            .collect(),
                        id: view.id.clone(),
                        number: view.number,
                        color: view.color,
                    })
                    .collect();
                RowTextures {
                    index: row.index,
                    name: row.name,
                    text: row.text,
                    failed: row.failed,
                    can_add_crop: row.can_add_crop,
                    cells,
                    close_views,
                }
            })
            .collect();

        Self {
            methods: grid.methods,
            rows,
            aspect_warnings: grid.aspect_warnings,
        }
    }
}

/// Which editor session the loaded reference belongs to.
#[derive(Clone, PartialEq)]
pub struct EditorKey {
    pub sample: usize,
    pub crop_id: String,
    pub reference: String,
}

/// Selection state of the crop editor window, in reference display pixels.
#[derive(Default)]
pub struct EditorUi {
    pub loaded: Option<EditorKey>,
    pub reference: Option<(egui::TextureHandle, DisplayMapping)>,
    pub selection: Option<egui::Rect>,
    /// Display coords of drag start (for creating a new selection).
    pub drag_start: Option<egui::Pos2>,
    pub moving: bool,
    pub move_offset: Option<egui::Vec2>,
    pub preview: Option<egui::TextureHandle>,
    pub preview_stale: bool,
}

impl EditorUi {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn display_rect(&self) -> Option<DisplayRect> {
        self.selection.map(|r| DisplayRect {
            left: r.left() as f64,
            top: r.top() as f64,
            width: r.width() as f64,
            height: r.height() as f64,
        })
    }
}
