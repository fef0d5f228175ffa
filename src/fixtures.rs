//! Trimmed-down basketball-reference pages used across the test modules.

/// Awards page: live `#mvp` table with its decorative `over_header` row,
/// plus a commented-out secondary table the way the site ships them.
pub const MVP_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en"><head><title>1991 NBA Awards Voting | Basketball-Reference.com</title></head>
<body>
<div id="content">
<div id="all_mvp" class="table_wrapper">
<div class="table_container" id="div_mvp">
<table class="sortable stats_table" id="mvp" data-cols-to-freeze=",3">
<caption>Most Valuable Player Table</caption>
<thead>
<tr class="over_header"><th aria-label="" data-stat="" colspan="8" class=" over_header center"></th><th aria-label="" data-stat="header_tmp" colspan="4" class="over_header center">Per Game</th></tr>
<tr><th data-stat="rank">Rank</th><th data-stat="player">Player</th><th data-stat="age">Age</th><th data-stat="team_id">Tm</th><th data-stat="votes_first">First</th><th data-stat="points_won">Pts Won</th><th data-stat="points_max">Pts Max</th><th data-stat="award_share">Share</th><th data-stat="pts_per_g">PTS</th><th data-stat="trb_per_g">TRB</th><th data-stat="ast_per_g">AST</th><th data-stat="ws">WS</th></tr>
</thead>
<tbody>
<tr><th data-stat="rank">1</th><td data-stat="player"><a href="/players/j/jordami01.html">Michael Jordan</a></td><td data-stat="age">27</td><td data-stat="team_id"><a href="/teams/CHI/1991.html">CHI</a></td><td data-stat="votes_first">77.0</td><td data-stat="points_won">891.0</td><td data-stat="points_max">960</td><td data-stat="award_share">.928</td><td data-stat="pts_per_g">31.5</td><td data-stat="trb_per_g">6.0</td><td data-stat="ast_per_g">5.5</td><td data-stat="ws">20.3</td></tr>
<tr><th data-stat="rank">2</th><td data-stat="player"><a href="/players/j/johnsma02.html">Magic Johnson</a></td><td data-stat="age">31</td><td data-stat="team_id"><a href="/teams/LAL/1991.html">LAL</a></td><td data-stat="votes_first">10.0</td><td data-stat="points_won">497.0</td><td data-stat="points_max">960</td><td data-stat="award_share">.518</td><td data-stat="pts_per_g">19.4</td><td data-stat="trb_per_g">7.0</td><td data-stat="ast_per_g">12.5</td><td data-stat="ws">15.4</td></tr>
<tr><th data-stat="rank">3</th><td data-stat="player"><a href="/players/r/robinda01.html">David Robinson</a></td><td data-stat="age">25</td><td data-stat="team_id"><a href="/teams/SAS/1991.html">SAS</a></td><td data-stat="votes_first">6.0</td><td data-stat="points_won">476.0</td><td data-stat="points_max">960</td><td data-stat="award_share">.496</td><td data-stat="pts_per_g">25.6</td><td data-stat="trb_per_g">13.0</td><td data-stat="ast_per_g">2.5</td><td data-stat="ws">17.0</td></tr>
</tbody>
</table>
</div>
</div>
<div id="all_roy" class="table_wrapper">
<div class="placeholder"></div>
<!--
<div class="table_container" id="div_roy">
<table class="sortable stats_table" id="roy">
<thead><tr><th data-stat="player">Player</th></tr></thead>
<tbody><tr><td data-stat="player">Derrick Coleman</td></tr></tbody>
</table>
</div>
-->
</div>
</div>
</body></html>
"#;

/// Awards page whose `#mvp` table only exists inside an HTML comment.
pub const MVP_PAGE_COMMENTED: &str = r#"<html><body>
<div id="all_mvp" class="table_wrapper">
<div class="placeholder"></div>
<!--
<table class="stats_table" id="mvp">
<thead>
<tr class="over_header"><th data-stat="" colspan="8"></th></tr>
<tr><th data-stat="rank">Rank</th><th data-stat="player">Player</th><th data-stat="team_id">Tm</th><th data-stat="award_share">Share</th></tr>
</thead>
<tbody>
<tr><th data-stat="rank">1</th><td data-stat="player">Nikola Jokic</td><td data-stat="team_id">DEN</td><td data-stat="award_share">.875</td></tr>
</tbody>
</table>
-->
</div>
</body></html>
"#;

/// Per-game page with a repeated header row in the middle of the body.
pub const PER_GAME_PAGE: &str = r#"<html><body>
<div id="all_per_game_stats">
<table class="sortable stats_table" id="per_game_stats">
<thead><tr><th data-stat="ranker">Rk</th><th data-stat="player">Player</th><th data-stat="pos">Pos</th><th data-stat="team_id">Tm</th><th data-stat="pts_per_g">PTS</th></tr></thead>
<tbody>
<tr class="full_table"><th data-stat="ranker">1</th><td data-stat="player">Alaa Abdelnaby</td><td data-stat="pos">PF</td><td data-stat="team_id">POR</td><td data-stat="pts_per_g">3.1</td></tr>
<tr class="thead"><th data-stat="ranker">Rk</th><th data-stat="player">Player</th><th data-stat="pos">Pos</th><th data-stat="team_id">Tm</th><th data-stat="pts_per_g">PTS</th></tr>
<tr class="full_table"><th data-stat="ranker">2</th><td data-stat="player">Mahmoud Abdul-Rauf</td><td data-stat="pos">PG</td><td data-stat="team_id">DEN</td><td data-stat="pts_per_g">14.1</td></tr>
</tbody>
</table>
</div>
</body></html>
"#;

/// Older standings page: division tables only, both in the live DOM.
pub const DIVISION_STANDINGS_PAGE: &str = r#"<html><body>
<table class="suppress_all stats_table" id="divs_standings_E">
<thead><tr><th data-stat="team_name">Eastern Conference</th><th data-stat="wins">W</th><th data-stat="losses">L</th></tr></thead>
<tbody>
<tr class="thead"><th colspan="3">Atlantic Division</th></tr>
<tr class="full_table"><th data-stat="team_name"><a href="/teams/BOS/1991.html">Boston Celtics</a>*</th><td data-stat="wins">56</td><td data-stat="losses">26</td></tr>
</tbody>
</table>
<table class="suppress_all stats_table" id="divs_standings_W">
<thead><tr><th data-stat="team_name">Western Conference</th><th data-stat="wins">W</th><th data-stat="losses">L</th></tr></thead>
<tbody>
<tr class="thead"><th colspan="3">Pacific Division</th></tr>
<tr class="full_table"><th data-stat="team_name"><a href="/teams/POR/1991.html">Portland Trail Blazers</a>*</th><td data-stat="wins">63</td><td data-stat="losses">19</td></tr>
</tbody>
</table>
</body></html>
"#;

/// Newer standings page: conference tables, the western one commented out,
/// and division tables that must not be picked up alongside them.
pub const CONFERENCE_STANDINGS_PAGE: &str = r#"<html><body>
<table class="stats_table" id="confs_standings_E">
<thead><tr><th data-stat="team_name">Eastern Conference</th><th data-stat="wins">W</th><th data-stat="losses">L</th></tr></thead>
<tbody>
<tr class="full_table"><th data-stat="team_name">Milwaukee Bucks*</th><td data-stat="wins">56</td><td data-stat="losses">17</td></tr>
</tbody>
</table>
<div class="placeholder"></div>
<!--
<table class="stats_table" id="confs_standings_W">
<thead><tr><th data-stat="team_name">Western Conference</th><th data-stat="wins">W</th><th data-stat="losses">L</th></tr></thead>
<tbody>
<tr class="full_table"><th data-stat="team_name">Los Angeles Lakers*</th><td data-stat="wins">52</td><td data-stat="losses">19</td></tr>
</tbody>
</table>
-->
<!--
<table class="stats_table" id="divs_standings_E">
<tbody><tr class="full_table"><th data-stat="team_name">Toronto Raptors*</th></tr></tbody>
</table>
-->
</body></html>
"#;
