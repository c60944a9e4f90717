use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, Presenter, SPIN_DURATION_MS, SpinToken, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use relm4::prelude::*;
use sortition::roster::Roster;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub rng: SmallRng,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Spin,
    Reveal(SpinToken),
    RosterLoaded(Roster),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::RosterLoaded(roster) => AppMsg::RosterLoaded(roster),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Presenter, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fortuna"),
            set_default_size: (560, 700),
            add_css_class: "fortuna-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_margin_all: 24,
                set_spacing: 24,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "fortuna-wheel",
                },

                #[name = "trigger"]
                gtk::Button {
                    set_halign: gtk::Align::Center,
                    add_css_class: "suggested-action",
                    #[watch]
                    set_label: model.state.borrow().trigger_label(),
                    #[watch]
                    set_sensitive: model.state.borrow().presenter.can_spin(),
                    connect_clicked[sender] => move |_| {
                        sender.input(AppMsg::Spin);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (presenter, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(WheelState::new(presenter)));

        let model = AppModel {
            state: state.clone(),
            rng: SmallRng::from_os_rng(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = wheel::draw(
                    cr,
                    &state_draw.borrow(),
                    f64::from(width),
                    f64::from(height),
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Spin => {
                // the presenter refuses re-entrant spins; the button is also
                // insensitive for the whole Spinning phase
                let Some(ticket) = self.state.borrow_mut().begin_spin(&mut self.rng) else {
                    return;
                };

                log::info!(
                    "Drew {} ({} remaining)",
                    ticket.value,
                    self.state.borrow().presenter.remaining()
                );

                self.animate_wheel();

                let sender = sender.clone();
                glib::timeout_add_local_once(Duration::from_millis(SPIN_DURATION_MS), move || {
                    sender.input(AppMsg::Reveal(ticket.token));
                });
            }
            AppMsg::Reveal(token) => {
                // stale tokens come from timers that outlived their spin
                if self.state.borrow_mut().presenter.reveal(token).is_none() {
                    return;
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::RosterLoaded(roster) => {
                self.state.borrow_mut().presenter.attach_roster(roster);
                self.drawing_area.queue_draw();
            }
        }
    }
}

impl AppModel {
    fn animate_wheel(&self) {
        let state = self.state.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let running = state.borrow_mut().tick(clock.frame_time());
            area.queue_draw();
            if running {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }
}
