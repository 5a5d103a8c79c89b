use glam::DVec2;
use iced_core::{
    Clipboard, Color, Element, Event, Layout, Length, Point, Rectangle, Shell, Size, Vector,
    Widget,
    layout::{self, Limits},
    mouse::{self, Interaction},
    renderer::{self, Quad},
    widget::{Tree, tree},
};
use iced_graphics::geometry::{Frame, Path, Stroke};
use matrixel_math::{ControlClass, TransformState, number::NumberText};

/// Side length of the square stage, in logical pixels.
pub const STAGE_SIZE: f32 = 350.0;
/// Untransformed size of the previewed element.
pub const ELEMENT_SIZE: DVec2 = DVec2::new(120.0, 80.0);

const STAGE_COLOR: Color = Color::from_rgb8(0x00, 0x65, 0x24);
const ELEMENT_COLOR: Color = Color::from_rgb8(0xFF, 0xFF, 0x50);
const OUTLINE_COLOR: Color = Color::from_rgb8(0x45, 0x45, 0x50);

/// Corners of an element of `size` centred on `center`, after `state` is
/// applied about the element's own centre. Clockwise from the top left.
///
/// `None` when any coefficient isn't finite, as nothing sensible can be drawn.
pub fn element_corners(state: &TransformState, center: DVec2, size: DVec2) -> Option<[DVec2; 4]> {
    if !state.is_finite() {
        return None;
    }
    let affine = state.to_affine();
    let half = size / 2.0;
    Some(
        [
            DVec2::new(-half.x, -half.y),
            DVec2::new(half.x, -half.y),
            DVec2::new(half.x, half.y),
            DVec2::new(-half.x, half.y),
        ]
        .map(|corner| center + affine.transform_point2(corner)),
    )
}

/// Whether `point` lies on the transformed element. Degenerate transforms
/// have no area to grab.
pub fn hits_element(state: &TransformState, center: DVec2, size: DVec2, point: DVec2) -> bool {
    if !state.is_finite() {
        return false;
    }
    let affine = state.to_affine();
    if affine.matrix2.determinant().abs() < f64::EPSILON {
        return false;
    }
    let local = affine.inverse().transform_point2(point - center);
    let half = size / 2.0;
    local.x.abs() <= half.x && local.y.abs() <= half.y
}

/// Translation after dragging by `delta` from `start`, settled onto the
/// translation slider's step.
///
/// An axis is only clamped to the slider range when it started inside it, so a
/// typed value beyond the range moves by the drag instead of jumping to an end.
pub fn dragged_translation(start: DVec2, delta: DVec2) -> (f64, f64) {
    (settle_axis(start.x, delta.x), settle_axis(start.y, delta.y))
}

fn settle_axis(start: f64, delta: f64) -> f64 {
    let class = ControlClass::Translation;
    if class.range().contains(&start) {
        class.snap(start + delta)
    } else {
        (start + delta).round_to(class.decimals())
    }
}

fn to_point(v: DVec2) -> Point {
    Point::new(v.x as f32, v.y as f32)
}

fn local_position(bounds: Rectangle, position: Point) -> DVec2 {
    DVec2::new((position.x - bounds.x) as f64, (position.y - bounds.y) as f64)
}

fn stage_center(bounds: Rectangle) -> DVec2 {
    DVec2::new(bounds.width as f64, bounds.height as f64) / 2.0
}

/// Live preview of a transform applied to a fixed element on a square stage.
/// The element can be dragged to change the translation.
pub struct TransformPreview<'a, Message> {
    transform: TransformState,
    on_translate: Option<Box<dyn Fn(f64, f64) -> Message + 'a>>,
}

impl<'a, Message> TransformPreview<'a, Message> {
    pub fn new(transform: TransformState) -> Self {
        Self {
            transform,
            on_translate: None,
        }
    }

    /// Called once when a drag ends, with the new `x` and `y`.
    pub fn on_translate<F>(mut self, f: F) -> Self
    where
        F: Fn(f64, f64) -> Message + 'a,
    {
        self.on_translate = Some(Box::new(f));
        self
    }

    fn grabbable_at(&self, bounds: Rectangle, position: Point) -> bool {
        self.on_translate.is_some()
            && hits_element(
                &self.transform,
                stage_center(bounds),
                ELEMENT_SIZE,
                local_position(bounds, position),
            )
    }
}

#[derive(Default)]
struct State {
    drag: Option<Drag>,
}

struct Drag {
    origin: Point,
    start: DVec2,
    delta: DVec2,
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer> for TransformPreview<'_, Message>
where
    Renderer: iced_core::Renderer + iced_graphics::geometry::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fixed(STAGE_SIZE), Length::Fixed(STAGE_SIZE))
    }

    fn layout(&mut self, _tree: &mut Tree, _renderer: &Renderer, _limits: &Limits) -> layout::Node {
        layout::Node::new(Size::new(STAGE_SIZE, STAGE_SIZE))
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<State>();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let Some(position) = cursor.position_over(bounds) else {
                    return;
                };
                if !self.grabbable_at(bounds, position) {
                    return;
                }

                state.drag = Some(Drag {
                    origin: position,
                    start: DVec2::new(self.transform.x.value(), self.transform.y.value()),
                    delta: DVec2::ZERO,
                });
                shell.capture_event();
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(drag) = &mut state.drag {
                    let offset = *position - drag.origin;
                    drag.delta = DVec2::new(offset.x as f64, offset.y as f64);
                    shell.capture_event();
                    shell.request_redraw();
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let Some(drag) = state.drag.take() else {
                    return;
                };

                // A click without movement isn't an edit.
                if drag.delta != DVec2::ZERO
                    && let Some(on_translate) = &self.on_translate
                {
                    let (x, y) = dragged_translation(drag.start, drag.delta);
                    shell.publish(on_translate(x, y));
                }
                shell.capture_event();
                shell.request_redraw();
            }
            _ => {}
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> Interaction {
        let state = tree.state.downcast_ref::<State>();
        if state.drag.is_some() {
            return Interaction::Grabbing;
        }

        let bounds = layout.bounds();
        match cursor.position_over(bounds) {
            Some(position) if self.grabbable_at(bounds, position) => Interaction::Grab,
            _ => Interaction::default(),
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();

        renderer.fill_quad(
            Quad {
                bounds,
                ..Default::default()
            },
            STAGE_COLOR,
        );

        let shown = match &state.drag {
            Some(drag) => {
                let (x, y) = dragged_translation(drag.start, drag.delta);
                self.transform.with_translation(x, y)
            }
            None => self.transform,
        };
        let Some(corners) = element_corners(&shown, stage_center(bounds), ELEMENT_SIZE) else {
            return;
        };

        let mut frame = Frame::new(renderer, bounds.size());
        let outline = Path::new(|builder| {
            builder.move_to(to_point(corners[0]));
            for corner in &corners[1..] {
                builder.line_to(to_point(*corner));
            }
            builder.close();
        });
        frame.fill(&outline, ELEMENT_COLOR);
        frame.stroke(
            &outline,
            Stroke::default().with_color(OUTLINE_COLOR).with_width(1.0),
        );

        // transform origin
        let origin = corners.iter().sum::<DVec2>() / 4.0;
        frame.fill(&Path::circle(to_point(origin), 3.0), OUTLINE_COLOR);

        renderer.with_layer(bounds, |renderer| {
            renderer.with_translation(Vector::new(bounds.x, bounds.y), |renderer| {
                renderer.draw_geometry(frame.into_geometry());
            });
        });
    }
}

impl<'a, Message, Theme, Renderer> From<TransformPreview<'a, Message>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: iced_core::Renderer + iced_graphics::geometry::Renderer + 'a,
{
    fn from(preview: TransformPreview<'a, Message>) -> Self {
        Element::new(preview)
    }
}
