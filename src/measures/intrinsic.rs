// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intrinsic causal contribution of actions to the next sensor state.
//!
//! Over p(s', s, a) the observed transition p(s'|s, a) is replaced by the
//! interventional one,
//!
//! p(s'|do(a)) = Σ_s p(s) p(s'|s, a)
//! p(s'|do(s)) = Σ_a p(a|s) p(s'|do(a))
//!
//! and the measure is Σ p(s, a) p(s'|do(a)) log2(p(s'|do(a)) / p(s'|do(s))).
//! It vanishes when every action leads to the same successor distribution.
//! Zahedi and Ay, "Quantifying morphological computation", Entropy 15(5), 2013.

use std::collections::HashMap;

use crate::estimators::approaches::discrete::distribution::JointDistribution;

/// Unnormalised intrinsic causal contribution in bits, over a distribution
/// with axes (s', s, a). Only states with nonzero mass are visited.
pub fn intrinsic_causal_contribution<D: JointDistribution>(p_next_s_a: &D) -> f64 {
    assert_eq!(p_next_s_a.shape().len(), 3, "expected axes (s', s, a)");
    let entries = p_next_s_a.entries();

    let mut p_sa: HashMap<(usize, usize), f64> = HashMap::new();
    let mut p_s: HashMap<usize, f64> = HashMap::new();
    for (code, p) in entries.iter() {
        *p_sa.entry((code[1], code[2])).or_insert(0.0) += p;
        *p_s.entry(code[1]).or_insert(0.0) += p;
    }

    // p(s'|do(a)), grouped by action
    let mut do_a: HashMap<usize, HashMap<usize, f64>> = HashMap::new();
    for (code, p) in entries.iter() {
        let (s_next, s, a) = (code[0], code[1], code[2]);
        let joint_sa = p_sa[&(s, a)];
        if joint_sa > 0.0 {
            *do_a.entry(a).or_default().entry(s_next).or_insert(0.0) += p_s[&s] * p / joint_sa;
        }
    }

    // p(s'|do(s))
    let mut do_s: HashMap<(usize, usize), f64> = HashMap::new();
    for (&(s, a), &joint_sa) in p_sa.iter() {
        let a_given_s = joint_sa / p_s[&s];
        if let Some(successors) = do_a.get(&a) {
            for (&s_next, &q) in successors.iter() {
                *do_s.entry((s_next, s)).or_insert(0.0) += a_given_s * q;
            }
        }
    }

    let mut r = 0.0;
    for (&(s, a), &joint_sa) in p_sa.iter() {
        let Some(successors) = do_a.get(&a) else {
            continue;
        };
        for (&s_next, &q) in successors.iter() {
            let baseline = do_s.get(&(s_next, s)).copied().unwrap_or(0.0);
            if q > 0.0 && baseline > 0.0 {
                r += joint_sa * q * (q / baseline).log2();
            }
        }
    }
    r
}
