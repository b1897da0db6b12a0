use std::env;
use miniforest::prelude::*;
use miniforest::Node;


fn tennis() -> Sample {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/tennis.csv");
    Sample::from_csv(path, true, "play").unwrap()
}


/// Rows `0..6` grow a tree that splits on `B`, then on `A` under `B = p`.
/// Rows `6..10` disagree with the `A` split.
fn overfit() -> (Sample, Sample) {
    let a = Feature::categorical(
        "A", ["x", "x", "x", "x", "y", "y", "y", "y", "x", "y"]
    );
    let b = Feature::categorical(
        "B", ["p", "q", "p", "q", "p", "q", "p", "p", "p", "q"]
    );
    let c = Feature::categorical(
        "C", ["0", "1", "0", "1", "1", "1", "0", "0", "0", "1"]
    );
    let sample = Sample::new(vec![a, b], c).unwrap();
    let ix = (0..10).collect::<Vec<_>>();
    sample.split(ix, 6, 10)
}


fn accuracy<C: Classifier>(f: &C, sample: &Sample) -> f64 {
    ConfusionMatrix::of(f, sample).unwrap().accuracy()
}


/// Tests for reduced-error pruning.
#[cfg(test)]
pub mod pruning_tests {
    use super::*;

    #[test]
    fn harmful_subtree_collapses() {
        let (train, validation) = overfit();
        let mut f = DecisionTreeBuilder::new().build().unwrap()
            .fit(&train)
            .unwrap();

        let b_p = f.root().child("p").unwrap();
        assert_eq!(f.root().get_split().unwrap().attribute().name(), "B");
        assert_eq!(b_p.get_split().unwrap().attribute().name(), "A");
        assert_eq!(f.n_leaves(), 3);

        f.prune(&validation).unwrap();
        println!("{f}");

        // The root split survives, the `A` split does not.
        assert_eq!(f.root().get_split().unwrap().attribute().name(), "B");
        let b_p = f.root().child("p").unwrap();
        assert!(matches!(b_p, Node::Rule(_)));
        assert!(b_p.is_terminal());
        assert_eq!(b_p.label(), "0");
        assert_eq!(f.n_leaves(), 2);
        assert_eq!(accuracy(&f, &validation), 1f64);
    }


    #[test]
    fn pruning_never_hurts_the_validation_accuracy() {
        let (train, validation) = overfit();
        let mut f = DecisionTreeBuilder::new().build().unwrap()
            .fit(&train)
            .unwrap();
        let before = accuracy(&f, &validation);
        f.prune(&validation).unwrap();
        assert!(accuracy(&f, &validation) >= before);

        let sample = tennis();
        for seed in [1, 2, 3, 4, 5] {
            let (train, validation) = sample.train_validation_split(0.4, seed);
            let mut f = DecisionTreeBuilder::new().build().unwrap()
                .fit(&train)
                .unwrap();
            let before = accuracy(&f, &validation);
            f.prune(&validation).unwrap();
            assert!(accuracy(&f, &validation) >= before);
        }
    }


    #[test]
    fn pruning_twice_changes_nothing() {
        let (train, validation) = overfit();
        let mut f = DecisionTreeBuilder::new().build().unwrap()
            .fit(&train)
            .unwrap();
        f.prune(&validation).unwrap();
        let once = f.clone();
        f.prune(&validation).unwrap();
        assert_eq!(f, once);
    }


    #[test]
    fn fit_with_prune_ratio_prunes_on_the_held_out_rows() {
        let sample = tennis();
        let f = DecisionTreeBuilder::new()
            .prune_ratio(0.3)
            .seed(5)
            .build()
            .unwrap()
            .fit(&sample)
            .unwrap();
        assert_eq!(f.prune_ratio(), 0.3);

        let (train, validation) = sample.train_validation_split(0.3, 5);
        assert_eq!(validation.shape().0, 4);
        let mut g = DecisionTreeBuilder::new().build().unwrap()
            .fit(&train)
            .unwrap();
        g.prune(&validation).unwrap();

        assert_eq!(f.root(), g.root());
    }


    #[test]
    fn tiny_prune_ratio_disables_pruning() {
        let sample = tennis();
        let f = DecisionTreeBuilder::new()
            .prune_ratio(0.0005)
            .build()
            .unwrap()
            .fit(&sample)
            .unwrap();
        let g = DecisionTreeBuilder::new().build().unwrap()
            .fit(&sample)
            .unwrap();
        assert_eq!(f.root(), g.root());
    }


    #[test]
    fn pruning_on_unrelated_columns_collapses_to_the_root_label() {
        let (train, _) = overfit();
        let mut f = DecisionTreeBuilder::new().build().unwrap()
            .fit(&train)
            .unwrap();

        // Same names, fresh attributes: nothing can be routed.
        let a = Feature::categorical("A", ["x", "y"]);
        let b = Feature::categorical("B", ["q", "q"]);
        let c = Feature::categorical("C", ["1", "1"]);
        let other = Sample::new(vec![a, b], c).unwrap();

        f.prune(&other).unwrap();
        assert!(f.root().is_terminal());
        assert_eq!(f.root().label(), "1");
    }
}
