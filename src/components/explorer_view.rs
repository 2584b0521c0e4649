use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tile_explorer::model::{FrameOutcome, InputEvent, MouseButton};
use tile_explorer::state::{
    DragMode, Explorer, FrameClock, InputCollector, SelectionPhase, TileInfo,
};
use tile_explorer::ExplorerConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    WheelEvent, Window,
};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use super::legend_panel::LegendPanel;
use super::status_panel::StatusPanel;
use super::stopped_overlay::StoppedOverlay;
use super::tile_info_panel::TileInfoPanel;
use crate::util::window_size;

const BACKGROUND: &str = "#0d1117";

#[derive(Properties, PartialEq, Clone)]
pub struct ExplorerViewProps {
    pub config: ExplorerConfig,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Status {
    fps: u32,
    position: String,
    tile_size: u32,
    tagged: usize,
    mode: &'static str,
}

impl Status {
    fn of(explorer: &Explorer, fps: u32) -> Self {
        let mode = match explorer.selection_phase() {
            SelectionPhase::Idle => "idle",
            SelectionPhase::Dragging(DragMode::Tagging) => "tagging",
            SelectionPhase::Dragging(DragMode::Untagging) => "untagging",
        };
        Self {
            fps,
            position: explorer.position_string(),
            tile_size: explorer.tile_size(),
            tagged: explorer.tagged_count(),
            mode,
        }
    }
}

/// DOM listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

fn listen(
    target: &EventTarget,
    name: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Option<Listener> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) =
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
    {
        log::error!("failed to attach `{name}` listener: {err:?}");
        return None;
    }
    Some(Listener {
        target: target.clone(),
        name,
        callback,
    })
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(window: &Window, frame: &FrameCallback, raf_id: &Cell<Option<i32>>) {
    if let Some(cb) = frame.borrow().as_ref() {
        raf_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

/// Everything the mount effect sets up; dropping it tears the view down.
struct Mounted {
    window: Window,
    _listeners: Vec<Listener>,
    frame: FrameCallback,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The frame closure holds its own cell; break the cycle.
        self.frame.borrow_mut().take();
    }
}

fn canvas_pos(canvas: &HtmlCanvasElement, e: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn fit_canvas(canvas: &HtmlCanvasElement, window: &Window) -> (u32, u32) {
    let (width, height) = window_size(window);
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

fn draw(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, explorer: &Explorer) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for (_, record) in explorer.visible_records() {
        let rect = record.rect;
        ctx.set_fill_style_str(&record.colour.to_css());
        ctx.fill_rect(rect.x, rect.y, rect.size, rect.size);
    }
}

struct Shell {
    canvas: HtmlCanvasElement,
    input: Rc<RefCell<InputCollector>>,
    explorer: Rc<RefCell<Explorer>>,
    ticks_per_second: u32,
    status: UseStateHandle<Status>,
    hover: UseStateHandle<Option<TileInfo>>,
    stopped: UseStateHandle<bool>,
}

fn mount(shell: Shell) -> Option<Mounted> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let Shell {
        canvas,
        input,
        explorer,
        ticks_per_second,
        status,
        hover,
        stopped,
    } = shell;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let (width, height) = fit_canvas(&canvas, &window);
    input.borrow_mut().push(InputEvent::Resize { width, height });

    let mut listeners = Vec::new();
    {
        let input = input.clone();
        listeners.extend(listen(&window, "keydown", move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if input.borrow_mut().key_down(&e.code()) {
                e.prevent_default();
            }
        }));
    }
    {
        let input = input.clone();
        listeners.extend(listen(&window, "keyup", move |e| {
            if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                input.borrow_mut().key_up(&e.code());
            }
        }));
    }
    {
        let input = input.clone();
        listeners.extend(listen(&window, "blur", move |_| {
            input.borrow_mut().release_all();
        }));
    }
    {
        let input = input.clone();
        let canvas_md = canvas.clone();
        listeners.extend(listen(&canvas, "mousedown", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pos = canvas_pos(&canvas_md, e);
            let button = MouseButton::from_dom(e.button());
            let mut input = input.borrow_mut();
            input.set_mouse(pos);
            if button == MouseButton::Primary {
                input.set_primary(true);
            }
            input.push(InputEvent::MouseDown { button, pos });
        }));
    }
    {
        // On the window so a drag released outside the canvas still ends.
        let input = input.clone();
        let canvas_mu = canvas.clone();
        listeners.extend(listen(&window, "mouseup", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut input = input.borrow_mut();
            input.set_mouse(canvas_pos(&canvas_mu, e));
            if MouseButton::from_dom(e.button()) == MouseButton::Primary {
                input.set_primary(false);
            }
        }));
    }
    {
        let input = input.clone();
        let canvas_mm = canvas.clone();
        listeners.extend(listen(&window, "mousemove", move |e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                input.borrow_mut().set_mouse(canvas_pos(&canvas_mm, e));
            }
        }));
    }
    {
        let input = input.clone();
        let canvas_wh = canvas.clone();
        listeners.extend(listen(&canvas, "wheel", move |e| {
            let Some(e) = e.dyn_ref::<WheelEvent>() else {
                return;
            };
            e.prevent_default();
            // Wheel up (negative deltaY) zooms in.
            let delta = if e.delta_y() < 0.0 {
                1
            } else if e.delta_y() > 0.0 {
                -1
            } else {
                return;
            };
            let pos = canvas_pos(&canvas_wh, e);
            input.borrow_mut().push(InputEvent::Scroll {
                delta,
                pos: Some(pos),
            });
        }));
    }
    listeners.extend(listen(&canvas, "contextmenu", |e| e.prevent_default()));
    {
        let input = input.clone();
        let canvas_rs = canvas.clone();
        let window_rs = window.clone();
        listeners.extend(listen(&window, "resize", move |_| {
            let (width, height) = fit_canvas(&canvas_rs, &window_rs);
            input.borrow_mut().push(InputEvent::Resize { width, height });
        }));
    }

    // Animation-frame loop
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    {
        let frame_loop = frame.clone();
        let raf_id_loop = raf_id.clone();
        let window_loop = window.clone();
        let mut clock = FrameClock::new(ticks_per_second);
        let mut fps = 0;
        let mut last_title = String::new();
        let mut last_status = Status::default();
        let mut last_hover: Option<TileInfo> = None;
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            let timing = clock.advance(now);
            let snapshot = input.borrow_mut().snapshot(timing.ticks);
            let mut explorer = explorer.borrow_mut();
            match explorer.update(&snapshot) {
                FrameOutcome::Quit => {
                    log::info!("explorer stopped at {}", explorer.position_string());
                    status.set(Status::of(&explorer, fps));
                    stopped.set(true);
                    raf_id_loop.set(None);
                    return;
                }
                FrameOutcome::Running { redraw } => {
                    if redraw {
                        draw(&ctx, &canvas, &explorer);
                    }
                }
            }

            if let Some(measured) = timing.fps {
                fps = measured;
            }
            let title = explorer.title(fps);
            if title != last_title {
                document.set_title(&title);
                last_title = title;
            }
            let current = Status::of(&explorer, fps);
            if current != last_status {
                status.set(current.clone());
                last_status = current;
            }
            let current_hover = snapshot.mouse_pos.map(|pos| explorer.tile_info(pos));
            if current_hover != last_hover {
                hover.set(current_hover.clone());
                last_hover = current_hover;
            }
            drop(explorer);

            request_frame(&window_loop, &frame_loop, &raf_id_loop);
        }) as Box<dyn FnMut(f64)>));
    }
    request_frame(&window, &frame, &raf_id);
    log::info!("explorer mounted at {width}x{height}");

    Some(Mounted {
        window,
        _listeners: listeners,
        frame,
        raf_id,
    })
}

#[function_component(ExplorerView)]
pub fn explorer_view(props: &ExplorerViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let input = use_mut_ref(InputCollector::default);
    let explorer = {
        let config = props.config.clone();
        use_mut_ref(move || Explorer::new(config))
    };
    let status = use_state(Status::default);
    let hover = use_state(|| None::<TileInfo>);
    let stopped = use_state(|| false);

    {
        let canvas_ref = canvas_ref.clone();
        let input = input.clone();
        let explorer = explorer.clone();
        let status = status.clone();
        let hover = hover.clone();
        let stopped = stopped.clone();
        let ticks_per_second = props.config.ticks_per_second;
        use_effect_with((), move |_| {
            let mounted = canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                mount(Shell {
                    canvas,
                    input,
                    explorer,
                    ticks_per_second,
                    status,
                    hover,
                    stopped,
                })
            });
            if mounted.is_none() {
                log::error!("explorer canvas could not be mounted");
            }
            move || drop(mounted)
        });
    }

    // Zoom buttons behave like a wheel notch over the window centre.
    let zoom = |delta: i32| {
        let input = input.clone();
        let explorer = explorer.clone();
        Callback::from(move |_: ()| {
            let centre = explorer.borrow().window().centre();
            input.borrow_mut().push(InputEvent::Scroll {
                delta,
                pos: Some(centre),
            });
        })
    };

    html! {
        <>
            <canvas ref={canvas_ref} style="display:block; position:absolute; top:0; left:0; cursor:crosshair;" />
            <StatusPanel
                fps={status.fps}
                position={status.position.clone()}
                tile_size={status.tile_size}
                tagged={status.tagged}
                mode={status.mode}
            />
            <TileInfoPanel info={(*hover).clone()} />
            <LegendPanel hover={(*hover).as_ref().map(|info| info.terrain)} />
            <CameraControls
                tile_size={status.tile_size}
                min_size={props.config.min_tile_size}
                max_size={props.config.max_tile_size}
                on_zoom_in={zoom(1)}
                on_zoom_out={zoom(-1)}
            />
            <StoppedOverlay
                show={*stopped}
                position={status.position.clone()}
                tagged={status.tagged}
            />
        </>
    }
}
