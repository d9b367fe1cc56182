use std::ops::{Deref, Index, IndexMut, Not};

/// Color of the link from a parent into this node. Red links always
/// lean left, black links are the "real" tree edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Index into a node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    #[inline]
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Node corresponds to a single entry in the tree, it exclusively owns
/// both of its subtrees.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    color: Color,
    children: [Link<K, V>; 2],
}

impl<K, V> Index<Direction> for Node<K, V> {
    type Output = Link<K, V>;

    #[inline]
    fn index(&self, dir: Direction) -> &Link<K, V> {
        &self.children[dir as usize]
    }
}

impl<K, V> IndexMut<Direction> for Node<K, V> {
    #[inline]
    fn index_mut(&mut self, dir: Direction) -> &mut Link<K, V> {
        &mut self.children[dir as usize]
    }
}

// Primary operations on a single node.
impl<K, V> Node<K, V> {
    // new nodes always enter the tree as red.
    pub(crate) fn new(key: K, value: V) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            color: Color::Red,
            children: [None, None],
        })
    }

    #[inline]
    pub(crate) fn child_deref(&self, dir: Direction) -> Option<&Node<K, V>> {
        self[dir].as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node<K, V>> {
        self.child_deref(Direction::Left)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node<K, V>> {
        self.child_deref(Direction::Right)
    }

    // overwrite value in place, key identity stays the same.
    #[inline]
    pub(crate) fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.color = !self.color
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Absent children count as black.
#[inline]
pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

//--------- rebalancing primitives ----------------

// Rotate the red link between `node` and its child opposite to `dir`
// over to the `dir` side. Pivot must be red. Left rotation:
//
//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
// Right rotation is the mirror image.
pub(crate) fn rotate<K, V>(mut node: Box<Node<K, V>>, dir: Direction) -> Box<Node<K, V>> {
    let mut x = match node[dir.opposite()].take() {
        Some(x) if !x.is_black() => x,
        _ => panic!("rotate(): rotating a black link ? Call the programmer"),
    };
    node[dir.opposite()] = x[dir].take();
    x.color = node.color;
    node.set_color(Color::Red);
    x[dir] = Some(node);
    x
}

//        (x)                   (!x)
//         |                     |
//        node                  node
//        / \                   / \
//      (y) (z)              (!y) (!z)
//     /      \              /      \
//   left    right         left    right
//
pub(crate) fn flip_color<K, V>(node: &mut Node<K, V>) {
    node.toggle_link();
    for dir in [Direction::Left, Direction::Right].iter() {
        if let Some(child) = node[*dir].as_mut() {
            child.toggle_link();
        }
    }
}

// Restore lean and consecutive-red rules at `node`, children must
// already be valid LLRB subtrees. Caller must rebind to the returned
// subtree root.
pub(crate) fn fixup<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(node.right_deref()) {
        node = rotate(node, Direction::Left);
    }
    let left = node.left_deref();
    if is_red(left) && is_red(left.and_then(Node::left_deref)) {
        node = rotate(node, Direction::Right);
    }
    if is_red(node.left_deref()) && is_red(node.right_deref()) {
        flip_color(&mut node);
    }
    node
}

// Borrow a red link for the left child, pulling one over from the
// right sibling when its left link is red.
pub(crate) fn move_red_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_color(&mut node);
    if is_red(node.right_deref().and_then(Node::left_deref)) {
        if let Some(right) = node[Direction::Right].take() {
            node[Direction::Right] = Some(rotate(right, Direction::Right));
        }
        node = rotate(node, Direction::Left);
        flip_color(&mut node);
    }
    node
}

// Borrow a red link for the right child, from the left side.
pub(crate) fn move_red_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_color(&mut node);
    if is_red(node.left_deref().and_then(Node::left_deref)) {
        node = rotate(node, Direction::Right);
        flip_color(&mut node);
    }
    node
}
