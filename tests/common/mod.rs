#![allow(dead_code)]

use drawing_board::{
    DrawingConfig, DrawingController, ExportError, RasterSink, ResizePolicy, StrokeStyle,
    SurfaceError,
};
use egui::{Color32, Pos2};

/// One call made on the sink
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Resize {
        width: u32,
        height: u32,
        background: Color32,
        policy: ResizePolicy,
    },
    Fill(Color32),
    Clear,
    Dot(Pos2, StrokeStyle),
    Line(Pos2, Pos2, StrokeStyle),
}

/// Sink that records every call instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub size: [u32; 2],
    pub ops: Vec<Op>,
}

impl RecordingSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width, height],
            ops: Vec::new(),
        }
    }
}

impl RasterSink for RecordingSink {
    fn size(&self) -> [u32; 2] {
        self.size
    }

    fn resize(
        &mut self,
        width: u32,
        height: u32,
        background: Color32,
        policy: ResizePolicy,
    ) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        self.size = [width, height];
        self.ops.push(Op::Resize {
            width,
            height,
            background,
            policy,
        });
        Ok(())
    }

    fn fill(&mut self, color: Color32) {
        self.ops.push(Op::Fill(color));
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_dot(&mut self, center: Pos2, style: &StrokeStyle) {
        self.ops.push(Op::Dot(center, *style));
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        self.ops.push(Op::Line(from, to, *style));
    }

    fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        Ok(b"\x89PNG".to_vec())
    }
}

/// Controller over a 100x100 recording sink with the start-up fill discarded
pub fn recording_controller(config: &DrawingConfig) -> DrawingController<RecordingSink> {
    let mut controller = DrawingController::new(RecordingSink::new(100, 100), config);
    controller.sink_mut().ops.clear();
    controller
}

pub fn take_ops(controller: &mut DrawingController<RecordingSink>) -> Vec<Op> {
    std::mem::take(&mut controller.sink_mut().ops)
}
