//! Heterogeneous task groups
//!
//! A [`TaskGroup`] gives the caller one handle over every task a
//! choreography produced, tweens and dynamics alike.

use crate::fling::FlingAnimation;
use crate::listener::{AnimationEnd, ListenerId};
use crate::scheduler::AnimationScheduler;
use crate::spring::SpringAnimation;
use crate::tween::TweenAnimation;
use cadence_core::{ElementId, Result, TaskState};

/// Any task a template can produce
#[derive(Clone, Debug)]
pub enum AnimationTask {
    Tween(TweenAnimation),
    Spring(SpringAnimation),
    Fling(FlingAnimation),
}

impl AnimationTask {
    pub fn start(&self) -> Result<()> {
        match self {
            AnimationTask::Tween(task) => task.start(),
            AnimationTask::Spring(task) => task.start(),
            AnimationTask::Fling(task) => task.start(),
        }
    }

    pub fn cancel(&self) -> Result<()> {
        match self {
            AnimationTask::Tween(task) => task.cancel(),
            AnimationTask::Spring(task) => task.cancel(),
            AnimationTask::Fling(task) => task.cancel(),
        }
    }

    pub fn state(&self) -> TaskState {
        match self {
            AnimationTask::Tween(task) => task.state(),
            AnimationTask::Spring(task) => task.state(),
            AnimationTask::Fling(task) => task.state(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    pub fn target(&self) -> Option<ElementId> {
        match self {
            AnimationTask::Tween(task) => task.target(),
            AnimationTask::Spring(task) => task.target(),
            AnimationTask::Fling(task) => task.target(),
        }
    }

    pub fn start_delay_ms(&self) -> i64 {
        match self {
            AnimationTask::Tween(task) => task.start_delay_ms(),
            AnimationTask::Spring(task) => task.start_delay_ms(),
            AnimationTask::Fling(task) => task.start_delay_ms(),
        }
    }

    pub fn set_start_delay(&self, delay_ms: i64) -> Result<()> {
        match self {
            AnimationTask::Tween(task) => {
                task.set_start_delay(delay_ms)?;
            }
            AnimationTask::Spring(task) => {
                task.set_start_delay(delay_ms)?;
            }
            AnimationTask::Fling(task) => {
                task.set_start_delay(delay_ms)?;
            }
        }
        Ok(())
    }

    pub fn add_end_listener(
        &self,
        listener: impl Fn(&AnimationEnd) + Send + Sync + 'static,
    ) -> ListenerId {
        match self {
            AnimationTask::Tween(task) => task.add_end_listener(listener),
            AnimationTask::Spring(task) => task.add_end_listener(listener),
            AnimationTask::Fling(task) => task.add_end_listener(listener),
        }
    }

    pub fn as_spring(&self) -> Option<&SpringAnimation> {
        match self {
            AnimationTask::Spring(task) => Some(task),
            _ => None,
        }
    }

    pub fn as_fling(&self) -> Option<&FlingAnimation> {
        match self {
            AnimationTask::Fling(task) => Some(task),
            _ => None,
        }
    }

    pub fn as_tween(&self) -> Option<&TweenAnimation> {
        match self {
            AnimationTask::Tween(task) => Some(task),
            _ => None,
        }
    }
}

impl From<TweenAnimation> for AnimationTask {
    fn from(task: TweenAnimation) -> Self {
        AnimationTask::Tween(task)
    }
}

impl From<SpringAnimation> for AnimationTask {
    fn from(task: SpringAnimation) -> Self {
        AnimationTask::Spring(task)
    }
}

impl From<FlingAnimation> for AnimationTask {
    fn from(task: FlingAnimation) -> Self {
        AnimationTask::Fling(task)
    }
}

/// Starts and cancels a set of tasks together
#[derive(Clone, Debug)]
pub struct TaskGroup {
    scheduler: AnimationScheduler,
    tasks: Vec<AnimationTask>,
}

impl TaskGroup {
    pub fn new(scheduler: &AnimationScheduler) -> Self {
        Self {
            scheduler: scheduler.clone(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(scheduler: &AnimationScheduler, tasks: Vec<AnimationTask>) -> Self {
        Self {
            scheduler: scheduler.clone(),
            tasks,
        }
    }

    pub fn push(&mut self, task: impl Into<AnimationTask>) {
        self.tasks.push(task.into());
    }

    pub fn tasks(&self) -> &[AnimationTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether any task is still running
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(AnimationTask::is_running)
    }

    /// Start every task. If one fails to start, the tasks started before it
    /// are cancelled and the error is returned.
    pub fn start(&self) -> Result<()> {
        self.scheduler.ensure_current_thread("start")?;
        tracing::debug!(tasks = self.tasks.len(), "starting task group");
        for (index, task) in self.tasks.iter().enumerate() {
            if let Err(err) = task.start() {
                for started in &self.tasks[..index] {
                    started.cancel()?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Cancel every task. End listeners have all fired when this returns.
    pub fn cancel(&self) -> Result<()> {
        self.scheduler.ensure_current_thread("cancel")?;
        tracing::debug!(tasks = self.tasks.len(), "cancelling task group");
        for task in &self.tasks {
            task.cancel()?;
        }
        Ok(())
    }
}

impl IntoIterator for TaskGroup {
    type Item = AnimationTask;
    type IntoIter = std::vec::IntoIter<AnimationTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::fling::DragForce;
    use crate::property::{AnimatedProperty, ValueHolder};
    use crate::spring::SpringForce;
    use cadence_core::{CadenceError, EndReason};

    #[test]
    fn test_start_failure_rolls_back() {
        let (scheduler, _frames) = AnimationScheduler::manual();
        let mut group = TaskGroup::new(&scheduler);
        let tween = TweenAnimation::new(&scheduler, ValueHolder::shared(0.0), None, 1.0, 100, Easing::Linear);
        group.push(tween.clone());
        // No final position, so this one refuses to start
        group.push(SpringAnimation::new(&scheduler, ValueHolder::shared(0.0), SpringForce::new()));

        assert!(matches!(
            group.start(),
            Err(CadenceError::UnsupportedOperation(_))
        ));
        assert_eq!(tween.state(), TaskState::Ended(EndReason::Cancelled));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_group_runs_mixed_tasks() {
        let (scheduler, frames) = AnimationScheduler::manual();
        let tweened = ValueHolder::shared(0.0);
        let sprung = ValueHolder::shared(0.0);
        let flung = ValueHolder::shared(0.0);

        let fling = FlingAnimation::new(&scheduler, flung.clone(), DragForce::new());
        fling.set_start_velocity(500.0).unwrap();

        let group = TaskGroup::with_tasks(
            &scheduler,
            vec![
                TweenAnimation::new(&scheduler, tweened.clone(), None, 1.0, 100, Easing::EASE).into(),
                SpringAnimation::to_position(&scheduler, sprung.clone(), 10.0).into(),
                fling.into(),
            ],
        );
        assert_eq!(group.len(), 3);

        group.start().unwrap();
        assert!(group.is_running());
        frames.run_frames(16, 1_000);

        assert!(!group.is_running());
        assert_eq!(tweened.get(), 1.0);
        assert_eq!(sprung.get(), 10.0);
        assert!(flung.get() > 0.0);
        assert!(group
            .tasks()
            .iter()
            .all(|task| task.state() == TaskState::Ended(EndReason::Natural)));
    }

    #[test]
    fn test_accessors() {
        let (scheduler, _frames) = AnimationScheduler::manual();
        let task: AnimationTask = SpringAnimation::to_position(&scheduler, ValueHolder::shared(0.0), 1.0).into();
        task.set_start_delay(30).unwrap();
        assert_eq!(task.start_delay_ms(), 30);
        assert!(task.as_spring().is_some());
        assert!(task.as_fling().is_none());
        assert!(task.as_tween().is_none());
        assert_eq!(task.target(), None);
    }
}
