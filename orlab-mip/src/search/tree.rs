//! Branch-and-bound tree controller.

use orlab_core::util::snap_integral;
use orlab_core::{SolveResult, SolveStatus};

use super::heuristics::{reduced_cost_fixing, round_to_feasible};
use super::{select_most_fractional, NodeStack, NodeStatus, SearchNode, TreeRecord};
use crate::error::MipResult;
use crate::master::{solve_checked, RelaxationBackend};
use crate::model::{IncumbentTracker, IntegerProgram, IpSolution, IpStatus};
use crate::settings::BnbSettings;

/// Branch-and-bound tree controller.
///
/// Depth-first search over an explicit node stack. The node budget counts
/// pops, including nodes discarded before their relaxation is solved.
pub struct BranchAndBound<'a> {
    /// Problem being solved.
    prob: &'a IntegerProgram,

    /// Open nodes.
    stack: NodeStack,

    /// Incumbent in canonical minimization form.
    pub incumbent: IncumbentTracker,

    /// Visualization record.
    tree: TreeRecord,

    /// Next node ID to assign.
    next_node_id: u64,

    /// Total nodes explored.
    nodes_explored: u64,

    /// Nodes pruned.
    nodes_pruned: u64,

    /// Root relaxation objective in the problem's own sense.
    root_bound: Option<f64>,

    /// Variables fixed at the root.
    fixed_vars: Vec<usize>,

    /// Settings.
    settings: BnbSettings,
}

impl<'a> BranchAndBound<'a> {
    /// Create a new B&B controller.
    pub fn new(prob: &'a IntegerProgram, settings: BnbSettings) -> Self {
        Self {
            prob,
            stack: NodeStack::new(),
            incumbent: IncumbentTracker::new(),
            tree: TreeRecord::new(settings.record_cap),
            next_node_id: 1, // 0 reserved for root
            nodes_explored: 0,
            nodes_pruned: 0,
            root_bound: None,
            fixed_vars: Vec::new(),
            settings,
        }
    }

    /// Run the search to completion or until the node budget is spent.
    pub fn solve(mut self, backend: &mut dyn RelaxationBackend) -> MipResult<IpSolution> {
        self.prob.validate()?;

        let mut root = SearchNode::root(self.prob.default_bounds());
        root.record = self.tree.insert(&root);

        if self.settings.max_nodes == 0 {
            self.stack.push(root);
            return Ok(self.finalize(IpStatus::LimitReached));
        }

        let root_res = solve_checked(backend, &self.prob.relaxation(&root.bounds))?;

        if !root_res.status.is_optimal() {
            self.nodes_explored = 1;
            self.report_failed_relaxation(&root_res, &root);
            root.status = NodeStatus::Infeasible;
            self.tree.update(&root);
            return Ok(self.finalize(IpStatus::Infeasible));
        }

        self.root_bound = Some(root_res.obj_val);
        root.value = Some(root_res.obj_val);

        if self.settings.verbose {
            log::info!(
                "B&B: {} vars, {} rows, root bound {:.6}",
                self.prob.num_vars(),
                self.prob.b_ub.len(),
                root_res.obj_val
            );
        }

        if select_most_fractional(self.prob, &root_res.x, &root.bounds, self.settings.int_tol)
            .is_none()
        {
            self.nodes_explored = 1;
            self.accept_integer(&mut root, &root_res.x);
            return Ok(self.finalize(IpStatus::Optimal));
        }

        if self.settings.rounding_heuristic {
            if let Some(x) = round_to_feasible(self.prob, &root_res.x, self.settings.bound_tol) {
                let value = self.prob.canonical(self.prob.objective(&x));
                if self.incumbent.update(&x, value) {
                    log::debug!("rounding heuristic: incumbent {:.6}", self.prob.objective(&x));
                }
            }
        }

        if self.settings.reduced_cost_fixing && self.incumbent.has_incumbent() {
            self.fixed_vars = reduced_cost_fixing(
                self.prob,
                &root_res,
                self.incumbent.obj_val,
                &mut root.bounds,
                self.settings.bound_tol,
            );
            if !self.fixed_vars.is_empty() {
                log::debug!("reduced-cost fixing: fixed {:?} at their lower bounds", self.fixed_vars);
            }
        }

        // fixing only touches variables at their bound, so the root point stays optimal
        root.cached = Some(root_res);
        self.stack.push(root);

        let mut limit_reached = false;
        while !self.stack.is_empty() {
            if self.nodes_explored >= self.settings.max_nodes {
                limit_reached = true;
                break;
            }
            let Some(node) = self.stack.pop() else {
                break;
            };
            self.nodes_explored += 1;

            self.process(node, backend)?;
            self.log_progress();
        }

        let status = if limit_reached {
            IpStatus::LimitReached
        } else if self.incumbent.has_incumbent() {
            IpStatus::Optimal
        } else {
            IpStatus::Infeasible
        };
        Ok(self.finalize(status))
    }

    /// Process one popped node.
    fn process(&mut self, mut node: SearchNode, backend: &mut dyn RelaxationBackend) -> MipResult<()> {
        let tol = self.settings.bound_tol;

        if let Some(parent_value) = node.parent_value {
            if self.incumbent.dominates(parent_value, tol) {
                self.finish(&mut node, NodeStatus::Pruned);
                self.nodes_pruned += 1;
                return Ok(());
            }
        }

        let res = match node.cached.take() {
            Some(res) => res,
            None => solve_checked(backend, &self.prob.relaxation(&node.bounds))?,
        };

        if !res.status.is_optimal() {
            self.report_failed_relaxation(&res, &node);
            self.finish(&mut node, NodeStatus::Infeasible);
            return Ok(());
        }

        node.value = Some(res.obj_val);
        let value = self.prob.canonical(res.obj_val);

        if self.incumbent.dominates(value, tol) {
            self.finish(&mut node, NodeStatus::Pruned);
            self.nodes_pruned += 1;
            return Ok(());
        }

        let decision =
            match select_most_fractional(self.prob, &res.x, &node.bounds, self.settings.int_tol) {
                Some(d) => d,
                None => {
                    self.accept_integer(&mut node, &res.x);
                    return Ok(());
                }
            };

        log::debug!(
            "node {} (depth {}): branch on x{} = {:.6}",
            node.id,
            node.depth,
            decision.var,
            decision.value
        );

        for change in decision.dive_order() {
            let mut child = node.child(self.next_node_id, change, value);
            self.next_node_id += 1;
            child.record = self.tree.insert(&child);
            self.stack.push(child);
        }
        self.finish(&mut node, NodeStatus::Branched);
        Ok(())
    }

    /// Mark an integral relaxation and offer it to the incumbent.
    fn accept_integer(&mut self, node: &mut SearchNode, x: &[f64]) {
        let x = snap_integral(x, self.settings.int_tol);
        let objective = self.prob.objective(&x);
        if self.incumbent.update(&x, self.prob.canonical(objective)) && self.settings.verbose {
            log::info!("New incumbent: obj={:.6} at node {}", objective, node.id);
        }
        self.finish(node, NodeStatus::Integer);
    }

    fn finish(&mut self, node: &mut SearchNode, status: NodeStatus) {
        debug_assert!(!node.status.is_terminal(), "node {} finished twice", node.id);
        node.status = status;
        self.tree.update(node);
    }

    fn report_failed_relaxation(&self, res: &SolveResult, node: &SearchNode) {
        match res.status {
            SolveStatus::Infeasible => log::debug!("node {}: relaxation infeasible", node.id),
            status => log::warn!(
                "node {}: relaxation ended with status {}, treating as infeasible",
                node.id,
                status
            ),
        }
    }

    /// Log progress (if verbose).
    fn log_progress(&self) {
        if !self.settings.verbose || self.settings.log_freq == 0 {
            return;
        }

        if self.nodes_explored % self.settings.log_freq != 0 {
            return;
        }

        let incumbent = if self.incumbent.has_incumbent() {
            format!("{:.6}", self.prob.canonical(self.incumbent.obj_val))
        } else {
            "-".to_string()
        };
        log::info!(
            "Nodes: {} ({} open) | Pruned: {} | Incumbent: {}",
            self.nodes_explored,
            self.stack.len(),
            self.nodes_pruned,
            incumbent,
        );
    }

    /// Build the final solution.
    fn finalize(self, status: IpStatus) -> IpSolution {
        let objective = self
            .incumbent
            .solution
            .as_ref()
            .map(|x| self.prob.objective(x));

        if self.settings.verbose {
            log::info!(
                "B&B finished: {} after {} nodes ({} pruned)",
                status,
                self.nodes_explored,
                self.nodes_pruned
            );
        }

        IpSolution {
            success: self.incumbent.has_incumbent(),
            status,
            x: self.incumbent.solution,
            objective,
            root_bound: self.root_bound,
            nodes_explored: self.nodes_explored,
            nodes_pruned: self.nodes_pruned,
            fixed_vars: self.fixed_vars,
            tree: self.tree.into_records(),
        }
    }
}
