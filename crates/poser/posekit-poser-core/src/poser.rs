#![allow(dead_code)]
//! Poser: pose orchestration over an owned value arena and child tree.
//!
//! Methods:
//! - new, set (resolve → cancel → transition → clamp → delay → start),
//!   advance (driver tick), transition_status, child management, destroy.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use posekit_api_core::{RawValue, ValueType};

use crate::action::{ActionSpec, ActiveAction, StepOutcome};
use crate::bounds::{clamps_for, is_drag_pose, DragBounds};
use crate::config::PoserConfig;
use crate::error::PoseError;
use crate::flip::{is_flip_pose, FlipResolver};
use crate::ids::{ChildId, IdAllocator, TransitionId};
use crate::outputs::{Change, Outputs, PoseEvent};
use crate::pose::{PoseMap, StaggerDirection};
use crate::slot::ValueSlot;
use crate::stagger::stagger_delay;
use crate::transition::{default_transition, TransitionCtx, TransitionDecision};

/// Per-invocation options. `extra` is passed through to transition
/// resolution untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SetOptions {
    #[serde(default)]
    pub delay: Option<f32>,
    #[serde(default)]
    pub extra: JsonValue,
}

impl SetOptions {
    pub fn with_delay(delay_ms: f32) -> Self {
        Self {
            delay: Some(delay_ms),
            extra: JsonValue::Null,
        }
    }

    /// Copy of these options with only the delay overridden, as handed to
    /// cascaded children.
    pub fn delayed(&self, delay_ms: f32) -> Self {
        Self {
            delay: Some(delay_ms),
            extra: self.extra.clone(),
        }
    }
}

/// Settlement state of one `set` invocation's aggregate.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionStatus {
    /// At least one per-value or per-child completion is outstanding.
    Pending,
    /// Every completion resolved.
    Resolved,
    /// A terminal failure occurred; carries the first error.
    Failed(PoseError),
    /// The id was never issued by this poser.
    Unknown,
}

/// One value key's owned state. Keeping the live action inside the entry
/// makes at-most-one-animation-per-key structural rather than a registry
/// invariant.
#[derive(Debug)]
struct ValueEntry {
    key: String,
    slot: ValueSlot,
    active: Option<ActiveAction>,
    /// Pose that last started an animation for this key; contextual input
    /// to transition resolution only.
    last_pose: Option<String>,
}

/// Aggregate bookkeeping for one `set` invocation.
#[derive(Debug)]
struct TransitionRecord {
    id: TransitionId,
    pending_values: usize,
    children: Vec<(ChildId, TransitionId)>,
    failed: Option<PoseError>,
    settled: bool,
}

/// Construction-time properties. Poses are immutable once the poser is
/// built.
#[derive(Default)]
pub struct PoserProps {
    pub poses: PoseMap,
    pub initial_pose: Option<String>,
    pub drag_bounds: Option<DragBounds>,
    pub config: PoserConfig,
    pub values: Vec<(String, RawValue)>,
    pub types: Vec<(String, Box<dyn ValueType>)>,
    pub flip: Option<Box<dyn FlipResolver>>,
}

impl PoserProps {
    pub fn new(poses: PoseMap) -> Self {
        Self {
            poses,
            ..Default::default()
        }
    }

    pub fn with_initial_pose(mut self, name: &str) -> Self {
        self.initial_pose = Some(name.to_string());
        self
    }

    pub fn with_drag_bounds(mut self, bounds: DragBounds) -> Self {
        self.drag_bounds = Some(bounds);
        self
    }

    pub fn with_config(mut self, config: PoserConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed an explicit initial raw state; wins over pose-derived seeds.
    pub fn with_value(mut self, key: &str, initial: RawValue) -> Self {
        self.values.push((key.to_string(), initial));
        self
    }

    pub fn with_type<T: ValueType + 'static>(mut self, key: &str, descriptor: T) -> Self {
        self.types.push((key.to_string(), Box::new(descriptor)));
        self
    }

    pub fn with_flip_resolver<R: FlipResolver + 'static>(mut self, resolver: R) -> Self {
        self.flip = Some(Box::new(resolver));
        self
    }
}

/// The owning entity: value arena, pose library, transition records, and
/// exclusively-owned children. One poser tree is driven by one caller;
/// no locking is needed under that cooperative model.
pub struct Poser {
    config: PoserConfig,
    ids: IdAllocator,
    poses: PoseMap,
    types: HashMap<String, Box<dyn ValueType>>,
    values: Vec<ValueEntry>,
    records: Vec<TransitionRecord>,
    children: Vec<(ChildId, Poser)>,
    drag_bounds: Option<DragBounds>,
    flip: Option<Box<dyn FlipResolver>>,
    outputs: Outputs,
}

fn ensure_entry(entries: &mut Vec<ValueEntry>, key: &str, initial: RawValue) {
    if !entries.iter().any(|e| e.key == key) {
        entries.push(ValueEntry {
            key: key.to_string(),
            slot: ValueSlot::new(initial),
            active: None,
            last_pose: None,
        });
    }
}

impl Poser {
    pub fn new(props: PoserProps) -> Self {
        let PoserProps {
            poses,
            initial_pose,
            drag_bounds,
            config,
            values,
            types,
            flip,
        } = props;

        let mut entries: Vec<ValueEntry> = Vec::new();
        // Explicit seeds first so they win over pose-derived registration.
        for (key, initial) in values {
            ensure_entry(&mut entries, &key, initial);
        }
        // One slot per distinct target key across all poses, seeded from
        // the initial pose where it covers the key.
        let seed_pose = initial_pose.as_ref().and_then(|n| poses.get(n));
        for pose in poses.values() {
            for (key, _) in &pose.targets {
                let seeded = seed_pose
                    .and_then(|p| p.target(key))
                    .cloned()
                    .unwrap_or(RawValue::Number(0.0));
                ensure_entry(&mut entries, key, seeded);
            }
        }
        if let (Some(name), Some(pose)) = (&initial_pose, seed_pose) {
            for (key, _) in &pose.targets {
                if let Some(entry) = entries.iter_mut().find(|e| e.key == *key) {
                    entry.last_pose = Some(name.clone());
                }
            }
        }

        Self {
            config,
            ids: IdAllocator::new(),
            poses,
            types: types.into_iter().collect(),
            values: entries,
            records: Vec::new(),
            children: Vec::new(),
            drag_bounds,
            flip,
            outputs: Outputs::default(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.poses.contains_key(name)
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.slot.get())
    }

    pub fn velocity(&self, key: &str) -> Option<f32> {
        self.values
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.slot.velocity())
    }

    /// Current raw state of every registered value, in registration order.
    pub fn state(&self) -> Vec<(String, RawValue)> {
        self.values
            .iter()
            .map(|e| (e.key.clone(), e.slot.get().clone()))
            .collect()
    }

    /// Outputs accumulated since the last driver tick (including
    /// synchronous completions from `set`).
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Transition this poser, and recursively its children, to the named
    /// pose. Returns immediately with the invocation's aggregate id; poll
    /// it with [`Poser::transition_status`] while driving
    /// [`Poser::advance`].
    pub fn set(&mut self, next: &str, options: &SetOptions) -> TransitionId {
        let tid = self.ids.alloc_transition();
        let mut record = TransitionRecord {
            id: tid,
            pending_values: 0,
            children: Vec::new(),
            failed: None,
            settled: false,
        };

        // Resolve the pose; the derived flip variant is computed fresh
        // per invocation and never written back.
        let mut next_pose = self.poses.get(next).cloned();
        if next_pose.is_none() {
            log::debug!("pose '{next}' is not defined; no value animations dispatched");
        }
        let needs_flip = next_pose
            .as_ref()
            .map(|pose| is_flip_pose(next, pose))
            .unwrap_or(false);
        if needs_flip {
            if let Some(pose) = next_pose.take() {
                next_pose = Some(match self.flip.as_mut() {
                    Some(resolver) => resolver.flip_pose(next, &pose),
                    None => {
                        log::debug!("flip pose '{next}' used without a flip resolver");
                        pose
                    }
                });
            }
        }

        if let Some(pose) = &next_pose {
            let invocation_delay = options.delay.unwrap_or(0.0);
            let effective_delay = if invocation_delay > 0.0 {
                invocation_delay
            } else {
                pose.delay
            };

            for (key, target) in &pose.targets {
                let Some(idx) = self.values.iter().position(|e| e.key == *key) else {
                    log::warn!("pose '{next}' targets unknown value '{key}'");
                    continue;
                };

                // Cancel any superseded action for this key. Cancellation
                // is silent: the superseded invocation's aggregate simply
                // never hears from this key again.
                let (from_raw, velocity, prev_pose) = {
                    let entry = &mut self.values[idx];
                    entry.active = None;
                    (
                        entry.slot.get().clone(),
                        entry.slot.velocity(),
                        entry.last_pose.clone(),
                    )
                };

                let descriptor = self.types.get(key.as_str());
                let parsed = |raw: &RawValue| -> RawValue {
                    match descriptor {
                        Some(t) => t
                            .parse(raw)
                            .map(RawValue::Number)
                            .unwrap_or_else(|| raw.clone()),
                        None => raw.clone(),
                    }
                };

                let ctx = TransitionCtx {
                    key: key.clone(),
                    from: parsed(&from_raw),
                    velocity,
                    to: parsed(target),
                    prev_pose_key: prev_pose,
                    options: options.clone(),
                };

                let decision = match &pose.transition {
                    Some(resolver) => (**resolver)(&ctx),
                    None => default_transition(&ctx, &self.config),
                };

                let mut spec = match decision {
                    Ok(TransitionDecision::Interpolate(spec)) => spec,
                    Ok(TransitionDecision::Jump) => ActionSpec::instant(target.clone()),
                    Err(message) => {
                        let err = PoseError::Resolution {
                            key: key.clone(),
                            message,
                        };
                        log::error!("{err}");
                        if record.failed.is_none() {
                            record.failed = Some(err);
                        }
                        continue;
                    }
                };

                // Drag poses get their emitted values clamped to the
                // configured bounds; target resolution is untouched.
                if is_drag_pose(next) {
                    if let Some(bounds) = &self.drag_bounds {
                        spec.clamps.extend(clamps_for(bounds, key));
                    }
                }

                if effective_delay > 0.0 {
                    spec.pre_delay_ms = effective_delay;
                }

                let entry = &mut self.values[idx];
                entry.last_pose = Some(next.to_string());
                if spec.completes_synchronously() {
                    // A jump with no delay writes its target with no
                    // intermediate ticks and resolves now.
                    let out = spec.instant_value().unwrap_or_else(|| target.clone());
                    entry.slot.set(out.clone());
                    self.outputs.push_change(Change {
                        key: key.clone(),
                        value: out,
                    });
                } else {
                    entry.active = Some(ActiveAction::new(tid, spec));
                    record.pending_values += 1;
                }
            }
        }

        // Child cascade: always runs; timing seeds come from the resolved
        // pose when there is one.
        if !self.children.is_empty() {
            let (base, interval, direction) = match &next_pose {
                Some(pose) => (
                    pose.delay_children,
                    pose.stagger_children,
                    pose.stagger_direction,
                ),
                None => (0.0, 0.0, StaggerDirection::Forward),
            };
            let count = self.children.len();
            for (i, (cid, child)) in self.children.iter_mut().enumerate() {
                let delay = stagger_delay(i, count, base, interval, direction);
                let child_tid = child.set(next, &options.delayed(delay));
                record.children.push((*cid, child_tid));
            }
        }

        self.records.push(record);
        self.settle_record(self.records.len() - 1);
        tid
    }

    /// Drive every active action by `dt` seconds, cascade into children,
    /// and settle transition aggregates. The returned outputs are valid
    /// until the next call.
    pub fn advance(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();

        let mut completed: Vec<TransitionId> = Vec::new();
        for entry in &mut self.values {
            let Some(action) = entry.active.as_mut() else {
                continue;
            };
            match action.step(dt) {
                StepOutcome::Waiting => {}
                StepOutcome::Update(value) => {
                    entry.slot.update(value.clone(), dt);
                    self.outputs.push_change(Change {
                        key: entry.key.clone(),
                        value,
                    });
                }
                StepOutcome::Complete(value) => {
                    completed.push(action.transition);
                    entry.slot.update(value.clone(), dt);
                    self.outputs.push_change(Change {
                        key: entry.key.clone(),
                        value,
                    });
                    entry.active = None;
                }
            }
        }

        for tid in completed {
            if let Some(record) = self.records.iter_mut().find(|r| r.id == tid) {
                record.pending_values = record.pending_values.saturating_sub(1);
            }
        }

        for (_, child) in &mut self.children {
            child.advance(dt);
        }

        for idx in 0..self.records.len() {
            self.settle_record(idx);
        }

        &self.outputs
    }

    pub fn transition_status(&self, id: TransitionId) -> TransitionStatus {
        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            return TransitionStatus::Unknown;
        };
        if let Some(err) = &record.failed {
            return TransitionStatus::Failed(err.clone());
        }
        if record.settled {
            return TransitionStatus::Resolved;
        }
        TransitionStatus::Pending
    }

    /// Settle an aggregate once every per-value and per-child completion
    /// has resolved, or as soon as any terminal failure is known.
    fn settle_record(&mut self, idx: usize) {
        if self.records[idx].settled {
            return;
        }

        // Any terminal failure rejects the aggregate; the first one wins.
        let mut failure = self.records[idx].failed.clone();
        if failure.is_none() {
            for (cid, ctid) in self.records[idx].children.clone() {
                if let Some(child) = self.child(cid) {
                    if let TransitionStatus::Failed(err) = child.transition_status(ctid) {
                        failure = Some(err);
                        break;
                    }
                }
            }
        }
        if let Some(err) = failure {
            let record = &mut self.records[idx];
            record.failed = Some(err.clone());
            record.settled = true;
            let transition = record.id;
            self.outputs.push_event(PoseEvent::TransitionFailed {
                transition,
                message: err.to_string(),
            });
            return;
        }

        let record = &self.records[idx];
        if record.pending_values > 0 {
            return;
        }
        let children_resolved = record.children.iter().all(|(cid, ctid)| {
            // A child removed mid-flight can no longer report; treat its
            // leg as resolved rather than wedging the aggregate.
            self.child(*cid)
                .map(|c| matches!(c.transition_status(*ctid), TransitionStatus::Resolved))
                .unwrap_or(true)
        });
        if !children_resolved {
            return;
        }

        let record = &mut self.records[idx];
        record.settled = true;
        let transition = record.id;
        self.outputs
            .push_event(PoseEvent::TransitionCompleted { transition });
    }

    /// Add a child poser; children cascade in insertion order and are
    /// owned exclusively by this parent.
    pub fn add_child(&mut self, props: PoserProps) -> ChildId {
        let id = self.ids.alloc_child();
        self.children.push((id, Poser::new(props)));
        id
    }

    pub fn child(&self, id: ChildId) -> Option<&Poser> {
        self.children
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, child)| child)
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut Poser> {
        self.children
            .iter_mut()
            .find(|(cid, _)| *cid == id)
            .map(|(_, child)| child)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn remove_child(&mut self, id: ChildId) -> bool {
        let before = self.children.len();
        self.children.retain(|(cid, _)| *cid != id);
        before != self.children.len()
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Cancel every in-flight animation and destroy children. Values keep
    /// their last written state.
    pub fn destroy(&mut self) {
        for entry in &mut self.values {
            entry.active = None;
        }
        for (_, child) in &mut self.children {
            child.destroy();
        }
        self.children.clear();
    }
}
