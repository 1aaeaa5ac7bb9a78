//! Daemon responses shared by the decoder and session tests.

/// A four-atom chain (N-C-C-O) with two snapshots, followed by the prompt.
pub(crate) const TWO_SNAPSHOT_DOCUMENT: &str = concat!(
    "PyON 1 topology\n",
    "{\n",
    "  \"atoms\": [\n",
    "    [\"N\", -0.3, 1.55, 14.007, 7],\n",
    "    [\"C\", 0.1, 1.7, 12.011, 6],\n",
    "    [\"C\", 0.5, 1.7, 12.011, 6],\n",
    "    [\"O\", -0.5, 1.52, 15.999, 8]\n",
    "  ],\n",
    "  \"bonds\": [\n",
    "    [0, 1],\n",
    "    [1, 2],\n",
    "    [2, 3]\n",
    "  ]\n",
    "}\n",
    "---\n",
    "PyON 1 positions\n",
    "[\n",
    "  [0.0, 0.0, 0.0],\n",
    "  [1.4, 0.0, 0.0],\n",
    "  [2.1, 1.2, 0.0],\n",
    "  [3.3, 1.2, 0.1]\n",
    "]\n",
    "---\n",
    "PyON 1 positions\n",
    "[\n",
    "  [0.5, 0.0, 0.0],\n",
    "  [1.9, 0.1, 0.0],\n",
    "  [2.6, 1.3, 0.0],\n",
    "  [3.8, 1.3, 0.2]\n",
    "]\n",
    "---\n",
    "> "
);
