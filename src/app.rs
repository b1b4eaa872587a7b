use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use stickerboard_core::{
    BoardGeometry, DragOutcome, DragRelease, HeroSelection, ItemExtent, KeyPress, LayoutFetcher,
    LayoutOrigin, LoadRequest, StickerBoard,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, PointerEvent};
use yew::prelude::*;

use crate::manifest::BoardSetup;
use crate::platform::{self, BrowserCache, BrowserFetcher};

type SharedBoard = Rc<RefCell<StickerBoard<BrowserCache>>>;

/// Stickers are all absolutely positioned, so the board needs its own
/// height to be measurable.
const BOARD_STYLE: &str = "position: relative; min-height: 100vh;";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub setup: Rc<BoardSetup>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.setup, &other.setup)
    }
}

struct PointerTrack {
    pointer_id: i32,
    last: (i32, i32),
}

/// Fetches the published document without holding the board across the
/// await; a stale result is discarded by the board.
fn spawn_load(board: SharedBoard, request: LoadRequest) {
    wasm_bindgen_futures::spawn_local(async move {
        let published = BrowserFetcher.fetch_text(&request.path).await;
        board
            .borrow_mut()
            .complete_load(&request, published.as_deref());
    });
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key(),
        code: event.code(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
        repeat: event.repeat(),
    }
}

fn origin_label(origin: Option<LayoutOrigin>) -> &'static str {
    match origin {
        Some(LayoutOrigin::Published) => "published",
        Some(LayoutOrigin::Cached) => "cached",
        Some(LayoutOrigin::Defaults) => "defaults",
        None => "loading",
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let setup = props.setup.clone();
    let board: SharedBoard = {
        let setup = setup.clone();
        use_mut_ref(move || {
            StickerBoard::new(
                setup.content_set.clone(),
                setup.items.clone(),
                BrowserCache,
                setup.config.clone(),
                platform::current_orientation(),
            )
        })
    };
    let hero = use_mut_ref(HeroSelection::new);
    let pointer = use_mut_ref(|| None::<PointerTrack>);
    let lightbox = use_state(|| None::<String>);
    let force = use_force_update();
    let board_node = use_node_ref();

    {
        let board = board.clone();
        let force = force.clone();
        use_effect_with((), move |_| {
            let subscription = board.borrow_mut().subscribe(move |snapshot| {
                log::trace!(
                    "layout {} revision {}",
                    snapshot.orientation,
                    snapshot.revision
                );
                force.force_update();
            });
            let request = board.borrow_mut().initial_load();
            spawn_load(board.clone(), request);
            move || {
                board.borrow_mut().unsubscribe(subscription);
            }
        });
    }

    {
        let board = board.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_event| {
                    let request = board
                        .borrow_mut()
                        .observe_orientation(platform::current_orientation());
                    if let Some(request) = request {
                        log::info!("orientation {}", request.ticket.orientation);
                        spawn_load(board.clone(), request);
                    }
                })
            });
            move || drop(listener)
        });
    }

    {
        let board = board.clone();
        let force = force.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new_with_options(
                    &window,
                    "keydown",
                    EventListenerOptions {
                        phase: EventListenerPhase::Capture,
                        passive: false,
                    },
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if board.borrow_mut().handle_key(&key_press(event)).is_some() {
                            event.prevent_default();
                            force.force_update();
                        }
                    },
                )
            });
            move || drop(listener)
        });
    }

    let on_pointer_down = |id: String| {
        let board = board.clone();
        let pointer = pointer.clone();
        let force = force.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            let outcome = board.borrow_mut().begin_drag(&id);
            if !matches!(outcome, DragOutcome::Started { .. }) {
                return;
            }
            if let Some(target) = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            *pointer.borrow_mut() = Some(PointerTrack {
                pointer_id: event.pointer_id(),
                last: (event.client_x(), event.client_y()),
            });
            event.prevent_default();
            force.force_update();
        })
    };

    let on_pointer_move = {
        let board = board.clone();
        let pointer = pointer.clone();
        let force = force.clone();
        Callback::from(move |event: PointerEvent| {
            let mut tracked = pointer.borrow_mut();
            let Some(track) = tracked
                .as_mut()
                .filter(|track| track.pointer_id == event.pointer_id())
            else {
                return;
            };
            let (x, y) = (event.client_x(), event.client_y());
            let dx = (x - track.last.0) as f32;
            let dy = (y - track.last.1) as f32;
            track.last = (x, y);
            if let DragOutcome::Moved { .. } = board.borrow_mut().drag_by(dx, dy) {
                force.force_update();
            }
        })
    };

    let on_pointer_up = {
        let board = board.clone();
        let pointer = pointer.clone();
        let force = force.clone();
        let board_node = board_node.clone();
        Callback::from(move |event: PointerEvent| {
            let tracked = pointer
                .borrow()
                .as_ref()
                .is_some_and(|track| track.pointer_id == event.pointer_id());
            if !tracked {
                return;
            }
            pointer.borrow_mut().take();
            // Absolute children resolve percentages against the padding box.
            let geometry = board_node.cast::<Element>().map(|element| {
                BoardGeometry::new(element.client_width() as f32, element.client_height() as f32)
            });
            let extent = event
                .current_target()
                .and_then(|target| target.dyn_into::<HtmlElement>().ok())
                .map(|element| {
                    ItemExtent::new(element.offset_width() as f32, element.offset_height() as f32)
                });
            let outcome = board.borrow_mut().end_drag(DragRelease {
                geometry,
                extent,
                now_ms: platform::now_ms(),
            });
            log::debug!("drag end: {outcome:?}");
            force.force_update();
        })
    };

    let on_pointer_cancel = {
        let board = board.clone();
        let pointer = pointer.clone();
        let force = force.clone();
        Callback::from(move |_event: PointerEvent| {
            if pointer.borrow_mut().take().is_some() {
                board.borrow_mut().cancel_drag();
                force.force_update();
            }
        })
    };

    let on_click = |id: String| {
        let board = board.clone();
        let lightbox = lightbox.clone();
        Callback::from(move |event: MouseEvent| {
            if board.borrow_mut().suppress_click(platform::now_ms()) {
                event.prevent_default();
                event.stop_propagation();
                return;
            }
            lightbox.set(Some(id.clone()));
        })
    };

    let on_toggle_edit = {
        let board = board.clone();
        let force = force.clone();
        Callback::from(move |_: MouseEvent| {
            board.borrow_mut().toggle_edit_mode();
            force.force_update();
        })
    };

    let on_export = {
        let board = board.clone();
        Callback::from(move |_: MouseEvent| {
            let board = board.borrow();
            let json = board.export();
            match platform::copy_to_clipboard(&json) {
                Ok(()) => log::info!(
                    "layout-{}.json for {} copied",
                    board.orientation(),
                    board.content_set()
                ),
                Err(err) => {
                    log::warn!("clipboard unavailable: {err:?}");
                    log::info!("{json}");
                }
            }
        })
    };

    let on_reset = {
        let board = board.clone();
        Callback::from(move |_: MouseEvent| {
            board.borrow_mut().reset();
        })
    };

    let hero_src = hero
        .borrow_mut()
        .pick(&setup.hero_candidates, |len| {
            (js_sys::Math::random() * len as f64) as usize
        })
        .map(str::to_string);

    let view = board.borrow();
    let positions = view.positions();
    let live = view
        .live_offset()
        .map(|(id, dx, dy)| (id.to_string(), dx, dy));

    let stickers = view
        .items()
        .iter()
        .map(|item| {
            let Some(position) = positions.get(&item.id) else {
                return html! {};
            };
            let (dx, dy, dragging) = match &live {
                Some((id, dx, dy)) if *id == item.id => (*dx, *dy, true),
                _ => (0.0, 0.0, false),
            };
            let style = format!(
                "left: {:.3}%; top: {:.3}%; z-index: {}; touch-action: none; \
                 transform: translate(-50%, -50%) translate({dx}px, {dy}px) rotate({:.2}deg);",
                position.x,
                position.y,
                view.z_index(&item.id),
                position.rotation
            );
            let image = item.image.as_ref().map(|src| {
                html! {
                    <img
                        src={src.clone()}
                        alt={item.text.clone().unwrap_or_default()}
                        draggable="false"
                    />
                }
            });
            let caption = item
                .text
                .as_ref()
                .map(|text| html! { <p class="caption">{ text.clone() }</p> });
            html! {
                <div
                    key={item.id.clone()}
                    class={classes!("sticker", dragging.then_some("dragging"))}
                    style={style}
                    onpointerdown={on_pointer_down(item.id.clone())}
                    onpointermove={on_pointer_move.clone()}
                    onpointerup={on_pointer_up.clone()}
                    onpointercancel={on_pointer_cancel.clone()}
                    onclick={on_click(item.id.clone())}
                >
                    { for image }
                    { for caption }
                </div>
            }
        })
        .collect::<Html>();

    let lightbox_view = (*lightbox)
        .as_ref()
        .and_then(|id| view.items().iter().find(|item| &item.id == id))
        .map(|item| {
            let close = {
                let lightbox = lightbox.clone();
                Callback::from(move |_: MouseEvent| lightbox.set(None))
            };
            html! {
                <div class="lightbox" onclick={close}>
                    if let Some(src) = item.image.clone() {
                        <img src={src} alt={item.text.clone().unwrap_or_default()} />
                    }
                    if let Some(text) = item.text.clone() {
                        <p class="caption">{ text }</p>
                    }
                </div>
            }
        })
        .unwrap_or_else(|| html! {});

    let edit_mode = view.edit_mode();
    let title = view.content_set().title();
    let toolbar = if edit_mode {
        html! {
            <div class="edit-toolbar">
                <span class="layout-origin">
                    { format!("{} · {}", view.orientation(), origin_label(view.last_origin())) }
                </span>
                <button onclick={on_export}>{ "Export layout" }</button>
                <button onclick={on_reset}>{ "Reset" }</button>
                <button onclick={on_toggle_edit}>{ "Done" }</button>
            </div>
        }
    } else {
        html! {}
    };
    drop(view);

    html! {
        <main class="stickerboard">
            if let Some(src) = hero_src {
                <img class="hero" src={src} alt="" />
            }
            <h1>{ title }</h1>
            { toolbar }
            <div
                ref={board_node}
                class={classes!("board", edit_mode.then_some("editing"))}
                style={BOARD_STYLE}
            >
                { stickers }
            </div>
            { lightbox_view }
        </main>
    }
}
