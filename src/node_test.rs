use crate::node::{self, Color, Direction, Node};

fn colored(key: i64, color: Color) -> Box<Node<i64, i64>> {
    let mut node = Node::new(key, key * 10);
    node.set_color(color);
    node
}

fn keyof(node: Option<&Node<i64, i64>>) -> Option<i64> {
    node.map(|node| node.key)
}

#[test]
fn test_color() {
    assert_eq!(!Color::Red, Color::Black);
    assert_eq!(!Color::Black, Color::Red);
    assert_eq!(Direction::Left.opposite(), Direction::Right);
    assert_eq!(Direction::Right.opposite(), Direction::Left);

    let mut node = Node::new(1, 10);
    assert_eq!(node.color(), Color::Red);
    assert!(node::is_red(Some(&*node)));
    node.toggle_link();
    assert!(node.is_black());
    assert!(!node::is_red::<i64, i64>(None));

    assert_eq!(node.set_value(20), 10);
    assert_eq!(node.value, 20);
}

#[test]
fn test_rotate_left() {
    // 2(black) with red right child 4, which has children 3 and 5.
    let mut root = colored(2, Color::Black);
    let mut pivot = colored(4, Color::Red);
    pivot[Direction::Left] = Some(colored(3, Color::Black));
    pivot[Direction::Right] = Some(colored(5, Color::Black));
    root[Direction::Left] = Some(colored(1, Color::Black));
    root[Direction::Right] = Some(pivot);

    let root = node::rotate(root, Direction::Left);
    assert_eq!(root.key, 4);
    assert_eq!(root.color(), Color::Black);
    assert_eq!(keyof(root.right_deref()), Some(5));

    let left = root.left_deref().unwrap();
    assert_eq!(left.key, 2);
    assert_eq!(left.color(), Color::Red);
    assert_eq!(keyof(left.left_deref()), Some(1));
    assert_eq!(keyof(left.right_deref()), Some(3));
}

#[test]
fn test_rotate_right() {
    let mut root = colored(4, Color::Red);
    let mut pivot = colored(2, Color::Red);
    pivot[Direction::Left] = Some(colored(1, Color::Black));
    pivot[Direction::Right] = Some(colored(3, Color::Black));
    root[Direction::Left] = Some(pivot);
    root[Direction::Right] = Some(colored(5, Color::Black));

    let root = node::rotate(root, Direction::Right);
    assert_eq!(root.key, 2);
    assert_eq!(root.color(), Color::Red);
    assert_eq!(keyof(root.left_deref()), Some(1));

    let right = root.right_deref().unwrap();
    assert_eq!(right.key, 4);
    assert_eq!(right.color(), Color::Red);
    assert_eq!(keyof(right.left_deref()), Some(3));
    assert_eq!(keyof(right.right_deref()), Some(5));
}

#[test]
#[should_panic]
fn test_rotate_black_link() {
    let mut root = colored(2, Color::Black);
    root[Direction::Right] = Some(colored(3, Color::Black));
    node::rotate(root, Direction::Left);
}

#[test]
#[should_panic]
fn test_rotate_missing_pivot() {
    node::rotate(colored(2, Color::Black), Direction::Right);
}

#[test]
fn test_flip_color() {
    let mut root = colored(2, Color::Black);
    root[Direction::Left] = Some(colored(1, Color::Red));
    node::flip_color(&mut root);
    assert_eq!(root.color(), Color::Red);
    assert_eq!(root.left_deref().unwrap().color(), Color::Black);
    assert!(root.right_deref().is_none());

    root[Direction::Right] = Some(colored(3, Color::Black));
    node::flip_color(&mut root);
    assert_eq!(root.color(), Color::Black);
    assert_eq!(root.left_deref().unwrap().color(), Color::Red);
    assert_eq!(root.right_deref().unwrap().color(), Color::Red);
}

#[test]
fn test_fixup_right_red() {
    let mut root = colored(1, Color::Black);
    root[Direction::Right] = Some(colored(2, Color::Red));

    let root = node::fixup(root);
    assert_eq!(root.key, 2);
    assert!(root.is_black());
    assert_eq!(keyof(root.left_deref()), Some(1));
    assert!(node::is_red(root.left_deref()));
    assert!(root.right_deref().is_none());
}

#[test]
fn test_fixup_left_left_red() {
    let mut mid = colored(2, Color::Red);
    mid[Direction::Left] = Some(colored(1, Color::Red));
    let mut root = colored(3, Color::Black);
    root[Direction::Left] = Some(mid);

    // rotate right, then both children red, flip pushes red up.
    let root = node::fixup(root);
    assert_eq!(root.key, 2);
    assert_eq!(root.color(), Color::Red);
    assert_eq!(root.left_deref().unwrap().color(), Color::Black);
    assert_eq!(root.right_deref().unwrap().color(), Color::Black);
    assert_eq!(keyof(root.left_deref()), Some(1));
    assert_eq!(keyof(root.right_deref()), Some(3));
}

#[test]
fn test_fixup_valid() {
    let mut root = colored(2, Color::Black);
    root[Direction::Left] = Some(colored(1, Color::Red));

    let root = node::fixup(root);
    assert_eq!(root.key, 2);
    assert!(root.is_black());
    assert!(node::is_red(root.left_deref()));
}

#[test]
fn test_move_red_left() {
    // 2 red over black 1 and black 4, where 4 has a red left child 3.
    let mut right = colored(4, Color::Black);
    right[Direction::Left] = Some(colored(3, Color::Red));
    let mut root = colored(2, Color::Red);
    root[Direction::Left] = Some(colored(1, Color::Black));
    root[Direction::Right] = Some(right);

    let root = node::move_red_left(root);
    assert_eq!(root.key, 3);
    assert_eq!(root.color(), Color::Red);

    let left = root.left_deref().unwrap();
    assert_eq!(left.key, 2);
    assert!(left.is_black());
    assert_eq!(keyof(left.left_deref()), Some(1));
    assert!(node::is_red(left.left_deref()));

    let right = root.right_deref().unwrap();
    assert_eq!(right.key, 4);
    assert!(right.is_black());
}

#[test]
fn test_move_red_left_flip_only() {
    let mut root = colored(2, Color::Red);
    root[Direction::Left] = Some(colored(1, Color::Black));
    root[Direction::Right] = Some(colored(3, Color::Black));

    let root = node::move_red_left(root);
    assert_eq!(root.key, 2);
    assert!(root.is_black());
    assert!(node::is_red(root.left_deref()));
    assert!(node::is_red(root.right_deref()));
}

#[test]
fn test_move_red_right() {
    // 3 red over black 2 and black 4, where 2 has a red left child 1.
    let mut left = colored(2, Color::Black);
    left[Direction::Left] = Some(colored(1, Color::Red));
    let mut root = colored(3, Color::Red);
    root[Direction::Left] = Some(left);
    root[Direction::Right] = Some(colored(4, Color::Black));

    let root = node::move_red_right(root);
    assert_eq!(root.key, 2);
    assert_eq!(root.color(), Color::Red);
    assert_eq!(keyof(root.left_deref()), Some(1));
    assert!(root.left_deref().unwrap().is_black());

    let right = root.right_deref().unwrap();
    assert_eq!(right.key, 3);
    assert!(right.is_black());
    assert_eq!(keyof(right.right_deref()), Some(4));
    assert!(node::is_red(right.right_deref()));
}
