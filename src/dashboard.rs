//! The eframe/egui dashboard. Reads everything from the store, recomputes the
//! derived metrics each frame and drives the demo timers.

use eframe::{egui, App};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::events::{EventBridge, EventPublisher, T12Event};
use crate::metrics::{
    build_report, next_leaps, neuro_map, BrainArea, DashboardReport, Difficulty, MissionId,
    Prediction, QuantumFieldLevel, SkillKind, NEURO_NODES,
};
use crate::simulation::{DemoSimulator, NeuralActivity};
use crate::store::CommunityStore;

const ANALYSIS_DURATION: Duration = Duration::from_secs(3);
const PULSE_DURATION: Duration = Duration::from_secs(2);
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

const CYAN: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);
const PURPLE: egui::Color32 = egui::Color32::from_rgb(139, 92, 246);
const GREEN: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);
const DIM: egui::Color32 = egui::Color32::from_rgb(75, 85, 99);

pub struct CerebroApp {
    store: CommunityStore,
    bridge: EventBridge,
    publisher: EventPublisher,
    simulator: DemoSimulator,
    sim_config: SimulationConfig,

    last_community_tick: Instant,
    last_neural_tick: Instant,
    last_quantum_tick: Instant,
    pulse_until: Option<Instant>,
    activity: NeuralActivity,
    quantum_field: f64,
    new_pioneers_today: u32,

    selected_skill: Option<SkillKind>,
    selected_mission: Option<MissionId>,
    current_prediction: Option<Prediction>,
    analysis_started: Option<Instant>,

    concept_input: String,
    seconds_input: f64,
    track_input: String,
    nps_score: f64,
    event_json_input: String,
    status_message: Option<String>,
}

impl CerebroApp {
    pub fn new(store: CommunityStore, bridge: EventBridge, sim_config: SimulationConfig) -> Self {
        let mut simulator = DemoSimulator::from_config(&sim_config);
        let activity = simulator.neural_activity();
        let quantum_field = simulator.quantum_field();
        let new_pioneers_today = simulator.daily_new_pioneers();
        let publisher = bridge.publisher();
        let now = Instant::now();
        Self {
            store,
            bridge,
            publisher,
            simulator,
            sim_config,
            last_community_tick: now,
            last_neural_tick: now,
            last_quantum_tick: now,
            pulse_until: None,
            activity,
            quantum_field,
            new_pioneers_today,
            selected_skill: None,
            selected_mission: None,
            current_prediction: None,
            analysis_started: None,
            concept_input: "fracciones".to_string(),
            seconds_input: 60.0,
            track_input: String::new(),
            nps_score: 0.0,
            event_json_input: String::new(),
            status_message: None,
        }
    }

    fn run_timers(&mut self, now: Instant) {
        let community_period = Duration::from_millis(self.sim_config.community_tick_ms);
        if now.duration_since(self.last_community_tick) >= community_period {
            self.last_community_tick = now;
            let tick = self.simulator.community_tick();
            self.store.update_community_metrics(tick.update);
            self.new_pioneers_today = self.simulator.daily_new_pioneers();
            if tick.pulse {
                self.pulse_until = Some(now + PULSE_DURATION);
            }
        }

        let neural_period = Duration::from_millis(self.sim_config.neural_tick_ms);
        if now.duration_since(self.last_neural_tick) >= neural_period {
            self.last_neural_tick = now;
            self.activity = self.simulator.neural_activity();
        }

        let quantum_period = Duration::from_millis(self.sim_config.quantum_tick_ms);
        if now.duration_since(self.last_quantum_tick) >= quantum_period {
            self.last_quantum_tick = now;
            self.quantum_field = self.simulator.quantum_field();
        }

        if self.pulse_until.is_some_and(|until| now >= until) {
            self.pulse_until = None;
        }
    }

    fn finish_analysis(&mut self, now: Instant, report: &DashboardReport) {
        let Some(started) = self.analysis_started else {
            return;
        };
        if now.duration_since(started) < ANALYSIS_DURATION {
            return;
        }
        self.analysis_started = None;
        self.current_prediction = self.simulator.pick_prediction(&report.predictions).cloned();
        if let Some(prediction) = &self.current_prediction {
            debug!("Predictor picked {:?}", prediction.kind);
        }
    }

    fn ui_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("🧠 Cerebro Evolutivo");
            ui.label("Community & impact dashboard");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(identity) = self.store.user_identity() {
                    ui.label(format!(
                        "{} {} ({})",
                        identity.icon, identity.title, identity.suggested_age
                    ));
                }
            });
        });
    }

    fn ui_collective(&self, ui: &mut egui::Ui, report: &DashboardReport) {
        let metrics = self.store.community_metrics();
        let pulse = self.pulse_until.is_some();
        ui.group(|ui| {
            let heading = if pulse { "🌍 Collective Resonance ✨" } else { "🌍 Collective Resonance" };
            ui.heading(heading);
            ui.colored_label(CYAN, report.consciousness.label());
            ui.add(
                egui::ProgressBar::new((metrics.collective_progress / 100.0) as f32).text(format!(
                    "Progress to next evolution: {}%",
                    metrics.collective_progress.floor()
                )),
            );
            egui::Grid::new("collective_grid").striped(true).show(ui, |ui| {
                ui.label("Pioneers");
                ui.label(format!(
                    "{} (+{} in the last 24h)",
                    metrics.total_pioneers, self.new_pioneers_today
                ));
                ui.end_row();
                ui.label("Collective evolution index");
                ui.label(format!("{}", metrics.evolution_index.floor()));
                ui.end_row();
                ui.label("Global synaptic connections");
                ui.label(format!(
                    "{} ({} per pioneer)",
                    metrics.neural_connections, report.connections_per_pioneer
                ));
                ui.end_row();
                ui.label("Your contribution");
                ui.label(format!("{}%", metrics.user_contribution.floor()));
                ui.end_row();
            });
        });
    }

    fn ui_evolution(&self, ui: &mut egui::Ui, report: &DashboardReport) {
        let evolution = &report.evolution;
        ui.group(|ui| {
            ui.heading("Mental Evolution Index");
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(evolution.iem.to_string()).size(32.0).color(CYAN));
                ui.vertical(|ui| {
                    ui.strong(evolution.stage.name());
                    ui.label(evolution.stage.description());
                    ui.small(format!("Next: {}", evolution.stage.next_milestone()));
                });
            });
            for (name, value) in [
                ("Processing speed", evolution.processing_speed),
                ("Mental flexibility", evolution.mental_flexibility),
                ("Critical thinking", evolution.critical_thinking),
                ("Neuroplastic creativity", evolution.creativity),
            ] {
                ui.add(
                    egui::ProgressBar::new(value as f32 / 100.0).text(format!("{}: {}%", name, value)),
                );
            }
            ui.label(evolution.stage.outlook());
        });
    }

    fn ui_skills(&mut self, ui: &mut egui::Ui, report: &DashboardReport) {
        let skills = &report.skills;
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("🔬 Cognitive Lab");
                ui.label(format!("{}/{}", skills.total_level, skills.max_total_level));
            });
            for skill in &skills.skills {
                let selected = self.selected_skill == Some(skill.kind);
                let label = format!("{}  lvl {}/{}", skill.kind.name(), skill.level, skill.max_level);
                if ui.selectable_label(selected, label).clicked() {
                    self.selected_skill = if selected { None } else { Some(skill.kind) };
                }
                ui.add(
                    egui::ProgressBar::new(skill.level as f32 / skill.max_level as f32)
                        .text(format!("{}/{} XP", skill.xp, skill.next_level_xp)),
                );
            }
            if let Some(skill) = self.selected_skill.and_then(|kind| skills.get(kind)) {
                ui.separator();
                ui.strong(skill.kind.name());
                ui.label(skill.kind.description());
                ui.label(format!("Connections: {}", skill.neural_connections));
                ui.label(format!("Efficiency: {}%", skill.efficiency_percent()));
                ui.label(format!("XP remaining: {}", skill.xp_remaining()));
            }
        });
    }

    fn ui_neuro_map(&self, ui: &mut egui::Ui, report: &DashboardReport) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("🌟 Evolutionary Neural Network");
                ui.label(format!(
                    "{} · {}%",
                    report.evolution_level.name, report.evolution_level.percentage
                ));
            });
            let width = ui.available_width().min(600.0);
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, width * 0.6), egui::Sense::hover());
            let rect = response.rect;
            let to_screen = |x: f32, y: f32| {
                egui::pos2(
                    rect.left() + rect.width() * x / 100.0,
                    rect.top() + rect.height() * y / 100.0,
                )
            };

            for (from, to) in neuro_map::synapses() {
                let active = self.activity.is_synapse_active(from.id, to.id);
                let stroke = if active {
                    egui::Stroke::new(1.5, CYAN)
                } else {
                    egui::Stroke::new(0.5, DIM)
                };
                painter.line_segment([to_screen(from.x, from.y), to_screen(to.x, to.y)], stroke);
            }
            for node in NEURO_NODES {
                let center = to_screen(node.x, node.y);
                let active = self.activity.is_active(node.id);
                let radius = node.size / 2.5;
                if active {
                    painter.circle_filled(center, radius * 1.8, CYAN.gamma_multiply(0.25));
                }
                painter.circle_filled(center, radius, if active { PURPLE } else { DIM });
                painter.text(
                    center - egui::vec2(0.0, radius + 2.0),
                    egui::Align2::CENTER_BOTTOM,
                    node.skill,
                    egui::FontId::proportional(10.0),
                    egui::Color32::LIGHT_GRAY,
                );
            }
            ui.add(
                egui::ProgressBar::new((self.activity.level / 100.0) as f32)
                    .text(format!("Neural activity {}%", self.activity.level.floor())),
            );
            ui.horizontal_wrapped(|ui| {
                for area in BrainArea::LEGEND {
                    ui.small(area.name());
                }
            });
        });
    }

    fn ui_missions(&mut self, ui: &mut egui::Ui, report: &DashboardReport) {
        let board = &report.missions;
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("🎯 Evolutionary Missions");
                ui.label(format!(
                    "{}/{} · {} XP earned",
                    board.completed_count,
                    board.missions.len(),
                    board.total_xp
                ));
            });
            for mission in &board.missions {
                let selected = self.selected_mission == Some(mission.id);
                let marker = if !mission.is_unlocked {
                    "🔒"
                } else if mission.is_completed {
                    "✅"
                } else {
                    "⏳"
                };
                let difficulty = match mission.difficulty {
                    Difficulty::Initiate => "Initiate",
                    Difficulty::Evolutionary => "Evolutionary",
                    Difficulty::Transcendental => "Transcendental",
                };
                let mut label =
                    egui::RichText::new(format!("{} {} [{}]", marker, mission.title, difficulty));
                if mission.is_completed {
                    label = label.color(GREEN);
                }
                if ui.selectable_label(selected, label).clicked() {
                    self.selected_mission = if selected { None } else { Some(mission.id) };
                }
                if mission.is_unlocked {
                    ui.add(
                        egui::ProgressBar::new(mission.progress as f32 / mission.max_progress as f32)
                            .text(format!(
                                "{}/{} ({}%) · +{} XP",
                                mission.progress,
                                mission.max_progress,
                                mission.progress_percent(),
                                mission.reward_xp
                            )),
                    );
                } else {
                    for requirement in mission.requirements {
                        ui.small(format!("• {}", requirement));
                    }
                }
                if selected && mission.is_unlocked {
                    ui.label(mission.description);
                    ui.label(format!("Reward: {} ({} XP)", mission.reward_title, mission.reward_xp));
                }
            }
        });
    }

    fn ui_predictor(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let field_level = QuantumFieldLevel::from_reading(self.quantum_field);
            ui.horizontal(|ui| {
                ui.heading("🔮 Potential Predictor");
                ui.label(format!(
                    "{} · field {}Hz",
                    field_level.label(),
                    self.quantum_field.floor()
                ));
            });
            let analyzing = self.analysis_started.is_some();
            let button_text = if analyzing {
                "Analyzing quantum field..."
            } else {
                "Start predictive analysis"
            };
            if ui
                .add_enabled(!analyzing, egui::Button::new(button_text))
                .clicked()
            {
                self.analysis_started = Some(Instant::now());
                self.current_prediction = None;
            }
            if analyzing {
                ui.spinner();
            }
            if let Some(prediction) = &self.current_prediction {
                ui.separator();
                ui.strong(prediction.title);
                ui.label(prediction.description);
                ui.label(format!(
                    "Probability {}% · {}",
                    prediction.probability.floor(),
                    prediction.timeframe
                ));
                for recommendation in prediction.recommendations {
                    ui.small(format!("• {}", recommendation));
                }
            }
            ui.separator();
            ui.label("Next leaps");
            for leap in next_leaps() {
                ui.add(
                    egui::ProgressBar::new(leap.potential as f32 / 100.0)
                        .text(format!("{} · {} · {}", leap.area, leap.catalyst, leap.time_to_unlock)),
                );
            }
        });
    }

    fn ui_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controls");
        ui.separator();

        ui.label("Track progress");
        ui.text_edit_singleline(&mut self.concept_input);
        ui.horizontal(|ui| {
            ui.label("Seconds:");
            ui.add(
                egui::DragValue::new(&mut self.seconds_input)
                    .speed(1.0)
                    .clamp_range(0.0..=3600.0),
            );
        });
        if ui.button("Add time").clicked() {
            let concept = self.concept_input.trim();
            if concept.is_empty() {
                self.status_message = Some("Concept name is empty".to_string());
            } else {
                self.store.track_progress(concept, self.seconds_input);
                self.status_message = Some(format!("+{}s on '{}'", self.seconds_input, concept));
            }
        }
        ui.separator();

        ui.label("Complete track");
        ui.text_edit_singleline(&mut self.track_input);
        if ui.button("Complete").clicked() {
            let track = self.track_input.trim().to_string();
            if !track.is_empty() {
                self.store.complete_track(&track);
                self.status_message = Some(format!("Track '{}' completed", track));
                self.track_input.clear();
            }
        }
        ui.separator();

        ui.label("Feedback (NPS)");
        ui.add(egui::Slider::new(&mut self.nps_score, -100.0..=100.0).text("score"));
        if ui.button("Publish NPS_SUBMITTED").clicked() {
            self.publish(T12Event::nps_submitted(self.nps_score));
        }
        ui.collapsing("Raw event JSON", |ui| {
            ui.text_edit_multiline(&mut self.event_json_input);
            if ui.button("Publish").clicked() {
                match T12Event::from_json(&self.event_json_input) {
                    Ok(event) => self.publish(event),
                    Err(e) => self.status_message = Some(format!("Bad event: {}", e)),
                }
            }
        });
        ui.separator();

        if ui.button("Reset to defaults").clicked() {
            self.store.reset();
            self.selected_skill = None;
            self.selected_mission = None;
            self.current_prediction = None;
        }

        if let Some(message) = &self.status_message {
            ui.separator();
            ui.small(message);
        }

        ui.separator();
        ui.collapsing("Learning profile", |ui| match self.store.learning_profile() {
            Some(profile) => {
                let history = &profile.learning_history;
                ui.label(format!("User: {}", profile.user_id));
                ui.label(format!("Completed tracks: {}", history.completed_count()));
                ui.label(format!("Time spent: {}s", history.total_time_spent()));
                ui.label(format!("Emotion: {:.2}", history.emotion_or_neutral()));
                for (concept, seconds) in &history.time_spent_per_concept {
                    ui.small(format!("{}: {}s", concept, seconds));
                }
            }
            None => {
                ui.label("No learning profile");
            }
        });
    }

    fn publish(&mut self, event: T12Event) {
        let event_type = event.event_type().to_string();
        match self.publisher.publish(event) {
            Ok(()) => self.status_message = Some(format!("Published {}", event_type)),
            Err(e) => {
                warn!("Could not publish {}: {}", event_type, e);
                self.status_message = Some(e.to_string());
            }
        }
    }
}

impl App for CerebroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.bridge.deliver_pending(&mut self.store);
        self.run_timers(now);
        let report = build_report(self.store.state());
        self.finish_analysis(now, &report);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.ui_header(ui);
        });

        egui::SidePanel::left("controls")
            .min_width(220.0)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("controls_scroll")
                    .show(ui, |ui| self.ui_controls(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.ui_collective(ui, &report);
                    ui.columns(2, |columns| {
                        self.ui_evolution(&mut columns[0], &report);
                        self.ui_skills(&mut columns[1], &report);
                    });
                    self.ui_neuro_map(ui, &report);
                    ui.columns(2, |columns| {
                        self.ui_missions(&mut columns[0], &report);
                        self.ui_predictor(&mut columns[1]);
                    });
                });
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
