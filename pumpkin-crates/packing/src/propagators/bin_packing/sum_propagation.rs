use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::EmptyDomain;

/// Propagates `0 <= vars[j] <= upper_limits[j]` for every `j` and `sum(vars) == total`.
///
/// The bounds of every variable are tightened against the bounds of all others until a full pass
/// over the variables changes nothing.
pub(crate) fn propagate_sum<Var: IntegerVariable>(
    context: &mut PropagationContextMut<'_>,
    vars: &[Var],
    upper_limits: &[i32],
    total: i32,
) -> Result<(), EmptyDomain> {
    // `total` minus the sum of the upper (resp. lower) bounds.
    let mut slack_below = total;
    let mut slack_above = total;

    for (var, &upper_limit) in vars.iter().zip(upper_limits) {
        context.set_lower_bound(var, 0)?;
        context.set_upper_bound(var, upper_limit)?;

        slack_below -= context.upper_bound(var);
        slack_above -= context.lower_bound(var);
    }

    let mut changed = true;
    while changed {
        changed = false;

        for var in vars {
            let lower_bound = context.lower_bound(var);
            let implied_lower_bound = slack_below + context.upper_bound(var);
            context.set_lower_bound(var, implied_lower_bound)?;
            if context.lower_bound(var) != lower_bound {
                slack_above += lower_bound - context.lower_bound(var);
                changed = true;
            }

            let upper_bound = context.upper_bound(var);
            let implied_upper_bound = slack_above + context.lower_bound(var);
            context.set_upper_bound(var, implied_upper_bound)?;
            if context.upper_bound(var) != upper_bound {
                slack_below += upper_bound - context.upper_bound(var);
                changed = true;
            }
        }
    }

    Ok(())
}
