use crate::errors::{AppError, AppResult};
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerId, WorkerUpdate};
use crate::store::WorkerDirectory;

/// Search term plus status/shift filters used by `worker list`.
#[derive(Debug, Clone, Default)]
pub struct WorkerFilter {
    pub search: Option<String>,
    /// `None` means "all".
    pub status: Option<WorkerStatus>,
    /// `None` means "all"; compared case-insensitively.
    pub shift: Option<String>,
}

impl WorkerFilter {
    /// Build a filter from raw CLI values; `all` (any case) disables a filter.
    pub fn from_raw(
        search: Option<&str>,
        status: Option<&str>,
        shift: Option<&str>,
    ) -> AppResult<Self> {
        let status = match status.map(str::trim) {
            None => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(
                WorkerStatus::from_db_str(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))?,
            ),
        };

        let shift = shift
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            search,
            status,
            shift,
        })
    }

    pub fn matches(&self, worker: &Worker) -> bool {
        if let Some(term) = &self.search
            && !worker.matches_term(term)
        {
            return false;
        }
        if let Some(status) = self.status
            && worker.status != status
        {
            return false;
        }
        if let Some(shift) = &self.shift
            && !worker.shift.trim().eq_ignore_ascii_case(shift)
        {
            return false;
        }
        true
    }
}

/// Headcount per status over a worker listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub on_break: usize,
    pub off_duty: usize,
}

impl StatusCounts {
    pub fn of(workers: &[Worker]) -> Self {
        let mut c = Self {
            total: workers.len(),
            ..Default::default()
        };
        for w in workers {
            match w.status {
                WorkerStatus::Active => c.active += 1,
                WorkerStatus::OnBreak => c.on_break += 1,
                WorkerStatus::OffDuty => c.off_duty += 1,
            }
        }
        c
    }
}

/// Filtered listing; counts cover the filtered rows only.
#[derive(Debug, Clone, Default)]
pub struct WorkerListing {
    pub workers: Vec<Worker>,
    pub counts: StatusCounts,
}

/// Worker directory operations behind the `worker` subcommands.
pub struct WorkerLogic;

impl WorkerLogic {
    pub fn add<S: WorkerDirectory>(store: &mut S, new: &NewWorker) -> AppResult<Worker> {
        new.validate()?;
        let id = store.create_worker(new)?;
        store.get_by_id(id)?.ok_or(AppError::NotFound(id))
    }

    pub fn edit<S: WorkerDirectory>(
        store: &mut S,
        id: WorkerId,
        update: &WorkerUpdate,
    ) -> AppResult<Worker> {
        if update.is_empty() {
            return Err(AppError::InvalidField {
                field: "update",
                reason: "no field to change was given".into(),
            });
        }
        store.update_worker(id, update)
    }

    /// Remove the worker and all of its attendance; returns the removed record.
    pub fn delete<S: WorkerDirectory>(store: &mut S, id: WorkerId) -> AppResult<Worker> {
        let worker = store.get_by_id(id)?.ok_or(AppError::NotFound(id))?;
        store.delete_worker_cascade(id)?;
        Ok(worker)
    }

    pub fn list<S: WorkerDirectory>(store: &S, filter: &WorkerFilter) -> AppResult<WorkerListing> {
        let workers: Vec<Worker> = store
            .list_workers()?
            .into_iter()
            .filter(|w| filter.matches(w))
            .collect();
        let counts = StatusCounts::of(&workers);
        Ok(WorkerListing { workers, counts })
    }

    pub fn show<S: WorkerDirectory>(store: &S, id: WorkerId) -> AppResult<Worker> {
        store.get_by_id(id)?.ok_or(AppError::NotFound(id))
    }
}
